//! Half-width to full-width folding.

use unicode_normalization::UnicodeNormalization;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';
const FULL_WIDTH_SHIFT: u32 = 0xFEE0;

fn is_half_width_katakana(c: char) -> bool {
    ('\u{FF61}'..='\u{FF9F}').contains(&c)
}

/// Convert half-width characters to their full-width forms.
///
/// - Printable ASCII (`!`..=`~`) moves to the full-width block (+0xFEE0)
/// - ASCII space becomes the ideographic space U+3000
/// - Runs of half-width katakana are NFKC-normalized, so a voiced mark
///   following its base (`ｶﾞ`) composes into one character (`ガ`)
///
/// Everything else is left untouched, which makes the conversion idempotent.
///
/// ```
/// use meihyo::roster::to_full_width;
///
/// assert_eq!(to_full_width("ABC 123"), "ＡＢＣ　１２３");
/// assert_eq!(to_full_width("ｱｲｳ"), "アイウ");
/// assert_eq!(to_full_width("ｶﾞｲﾄﾞ"), "ガイド");
/// ```
pub fn to_full_width(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    let mut katakana_run = String::new();

    for c in text.chars() {
        if is_half_width_katakana(c) {
            katakana_run.push(c);
            continue;
        }
        if !katakana_run.is_empty() {
            out.extend(katakana_run.nfkc());
            katakana_run.clear();
        }
        out.push(match c {
            ' ' => IDEOGRAPHIC_SPACE,
            '!'..='~' => char::from_u32(c as u32 + FULL_WIDTH_SHIFT).unwrap_or(c),
            _ => c,
        });
    }
    if !katakana_run.is_empty() {
        out.extend(katakana_run.nfkc());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_block_shift() {
        assert_eq!(to_full_width("a~!"), "ａ～！");
    }

    #[test]
    fn test_japanese_untouched() {
        assert_eq!(to_full_width("王羲之「蘭亭序」"), "王羲之「蘭亭序」");
    }

    #[test]
    fn test_half_width_punctuation_katakana_range() {
        // U+FF61 (halfwidth ideographic full stop) is inside the katakana block.
        assert_eq!(to_full_width("ﾃｽﾄ｡"), "テスト。");
    }

    #[test]
    fn test_newline_preserved() {
        assert_eq!(to_full_width("A\nB"), "Ａ\nＢ");
    }

    proptest! {
        #[test]
        fn prop_full_width_is_idempotent(s in "\\PC{0,40}") {
            let once = to_full_width(&s);
            prop_assert_eq!(to_full_width(&once), once.clone());
        }

        #[test]
        fn prop_no_printable_ascii_survives(s in "[ -~]{0,40}") {
            let converted = to_full_width(&s);
            prop_assert!(!converted.chars().any(|c| (' '..='~').contains(&c)));
        }
    }
}
