//! Writing sheets to PDF.
//!
//! [`SheetExporter`] ties the pipeline together: entries are composed into
//! pages with the configured [`LayoutTable`], then serialized by the PDF
//! backend. Two output shapes are supported:
//!
//! - [`write_combined`](SheetExporter::write_combined): one document, two
//!   entries per page
//! - [`write_individual`](SheetExporter::write_individual): one single-page
//!   document per entry, named after the entry
//!
//! # Example
//!
//! ```no_run
//! use meihyo::export::{RenderConfig, SheetExporter};
//! use meihyo::layout::Template;
//! use meihyo::roster::{Entry, read_table};
//!
//! let entries: Vec<Entry> = read_table("roster.csv")?
//!     .iter()
//!     .map(Entry::from_raw)
//!     .collect();
//!
//! let config = RenderConfig::new().with_template(Template::Caption);
//! let exporter = SheetExporter::open(config)?;
//! exporter.write_combined(&entries, "roster.pdf")?;
//! # Ok::<(), meihyo::Error>(())
//! ```

mod pdf;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::compose::{Composer, RenderPage};
use crate::error::Result;
use crate::font::{FontPaths, FontSet};
use crate::layout::{LayoutTable, Template};
use crate::roster::Entry;
use crate::util::sanitize_file_stem;

pub use pdf::write_pdf;

/// Directory name used for individual output when none is given.
pub const DEFAULT_INDIVIDUAL_DIR: &str = "nameplate";

/// Configuration for sheet rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Which sheet is produced; selects the bold stroke ratio.
    pub template: Template,
    /// Draw glyphs with emulated bold.
    pub bold: bool,
    /// Where to load the faces from.
    pub fonts: FontPaths,
    pub layout: LayoutTable,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template: Template::default(),
            bold: true,
            fonts: FontPaths::default(),
            layout: LayoutTable::standard(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_fonts(mut self, fonts: FontPaths) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_layout(mut self, layout: LayoutTable) -> Self {
        self.layout = layout;
        self
    }

    /// Stroke ratio for emulated bold, or `None` when bold is off.
    pub fn bold_ratio(&self) -> Option<f32> {
        self.bold.then(|| self.template.bold_ratio())
    }
}

/// Renders entries into PDF documents.
#[derive(Debug, Clone)]
pub struct SheetExporter {
    config: RenderConfig,
    fonts: FontSet,
}

impl SheetExporter {
    /// Validate the layout and load the configured faces.
    ///
    /// Fails before any output is written if a font is missing.
    pub fn open(config: RenderConfig) -> Result<Self> {
        config.layout.validate()?;
        let fonts = FontSet::load(&config.fonts)?;
        Ok(Self { config, fonts })
    }

    /// Use already loaded faces.
    pub fn with_fonts(config: RenderConfig, fonts: FontSet) -> Result<Self> {
        config.layout.validate()?;
        Ok(Self { config, fonts })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Compose entries into pages, two per page.
    pub fn compose(&self, entries: &[Entry]) -> Vec<RenderPage> {
        Composer::new(&self.config.layout, &self.fonts).compose_pages(entries)
    }

    /// Render entries into one PDF document held in memory.
    pub fn render(&self, entries: &[Entry]) -> Result<Vec<u8>> {
        let pages = self.compose(entries);
        write_pdf(&pages, &self.fonts, self.config.bold_ratio())
    }

    /// Render entries into one document and write it to `writer`.
    pub fn export<W: Write>(&self, entries: &[Entry], writer: &mut W) -> Result<()> {
        let bytes = self.render(entries)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Write all entries into a single document at `path`.
    ///
    /// The document is rendered completely before the file is created.
    pub fn write_combined(&self, entries: &[Entry], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render(entries)?;
        write_file(path, &bytes)?;
        log::info!(
            "wrote {} entries on {} pages to {}",
            entries.len(),
            entries.len().div_ceil(2),
            path.display()
        );
        Ok(())
    }

    /// Write one document per entry into `dir`, creating it if needed.
    ///
    /// Returns the written paths in entry order.
    pub fn write_individual(&self, entries: &[Entry], dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let composer = Composer::new(&self.config.layout, &self.fonts);
        let mut names = OutputNames::default();
        let mut written = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let page = composer.compose_page(1, std::slice::from_ref(entry));
            let bytes = write_pdf(&[page], &self.fonts, self.config.bold_ratio())?;

            let path = dir.join(names.claim(&individual_file_stem(entry, index)));
            write_file(&path, &bytes)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
        }

        log::info!("wrote {} documents to {}", written.len(), dir.display());
        Ok(written)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

/// File stem for an entry's own document: `"{name} {work_info}"` without
/// characters that are invalid in file names.
///
/// Falls back to `entry_{n}` (1-based) when nothing usable remains.
///
/// ```
/// use meihyo::export::individual_file_stem;
/// use meihyo::roster::Entry;
///
/// let entry = Entry {
///     name: "山田太郎".into(),
///     work_info: "臨　王羲之　「蘭亭序」".into(),
///     ..Entry::default()
/// };
/// assert_eq!(individual_file_stem(&entry, 0), "山田太郎 臨　王羲之　「蘭亭序」");
/// assert_eq!(individual_file_stem(&Entry::default(), 4), "entry_5");
/// ```
pub fn individual_file_stem(entry: &Entry, index: usize) -> String {
    let stem = sanitize_file_stem(&format!("{} {}", entry.name, entry.work_info));
    if stem.trim().is_empty() {
        format!("entry_{}", index + 1)
    } else {
        stem
    }
}

/// Hands out `.pdf` file names, suffixing repeats with ` (2)`, ` (3)`, ...
#[derive(Debug, Default)]
struct OutputNames {
    used: HashSet<String>,
}

impl OutputNames {
    fn claim(&mut self, stem: &str) -> String {
        let mut candidate = format!("{stem}.pdf");
        let mut n = 2;
        while !self.used.insert(candidate.to_lowercase()) {
            candidate = format!("{stem} ({n}).pdf");
            n += 1;
        }
        candidate
    }
}

/// Default combined output: the input path with a `.pdf` extension.
pub fn default_combined_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Default individual output directory: `nameplate/` next to the input.
pub fn default_individual_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_INDIVIDUAL_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_ratio_follows_template() {
        let config = RenderConfig::new();
        assert_eq!(config.bold_ratio(), Some(0.05));
        let config = config.with_template(Template::Caption);
        assert_eq!(config.bold_ratio(), Some(0.03));
        assert_eq!(config.with_bold(false).bold_ratio(), None);
    }

    #[test]
    fn test_output_names_suffix_collisions() {
        let mut names = OutputNames::default();
        assert_eq!(names.claim("山田 作品"), "山田 作品.pdf");
        assert_eq!(names.claim("山田 作品"), "山田 作品 (2).pdf");
        assert_eq!(names.claim("山田 作品"), "山田 作品 (3).pdf");
        assert_eq!(names.claim("佐藤 作品"), "佐藤 作品.pdf");
    }

    #[test]
    fn test_individual_stem_strips_invalid_chars() {
        let entry = Entry {
            name: "山田".to_string(),
            work_info: "臨　「A/B:C?」".to_string(),
            ..Entry::default()
        };
        assert_eq!(individual_file_stem(&entry, 0), "山田 臨　「ABC」");
    }

    #[test]
    fn test_default_outputs() {
        let input = Path::new("/data/roster.csv");
        assert_eq!(default_combined_output(input), PathBuf::from("/data/roster.pdf"));
        assert_eq!(default_individual_dir(input), PathBuf::from("/data/nameplate"));
        assert_eq!(
            default_individual_dir(Path::new("roster.csv")),
            PathBuf::from("nameplate")
        );
    }

    #[test]
    fn test_open_reports_missing_font() {
        let config = RenderConfig::new().with_fonts(FontPaths::new(
            "/nonexistent/primary.ttf",
            "/nonexistent/fallback.ttf",
        ));
        let err = SheetExporter::open(config).unwrap_err();
        assert!(matches!(err, crate::Error::FontMissing { .. }));
    }

    #[test]
    fn test_open_rejects_invalid_layout_before_fonts() {
        let mut layout = LayoutTable::standard();
        layout.fields[0].font_size = 0.0;
        let config = RenderConfig::new()
            .with_layout(layout)
            .with_fonts(FontPaths::new("/nonexistent/a.ttf", "/nonexistent/b.ttf"));
        let err = SheetExporter::open(config).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidLayout(_)));
    }
}
