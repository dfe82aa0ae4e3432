//! meihyo - Vertical nameplate and caption sheets from a roster CSV

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use meihyo::export::{default_combined_output, default_individual_dir};
use meihyo::font::{DEFAULT_FALLBACK_FONT, DEFAULT_PRIMARY_FONT, FontSource};
use meihyo::{Entry, FontPaths, LayoutTable, RenderConfig, SheetExporter, Template, read_table};

#[derive(Parser)]
#[command(name = "meihyo")]
#[command(version, about = "Vertical nameplate and caption sheets from a roster CSV", long_about = None)]
#[command(after_help = "EXAMPLES:
    meihyo roster.csv                        Write roster.pdf, two entries per page
    meihyo roster.csv --individual           One PDF per entry in nameplate/
    meihyo roster.csv -t caption -o cap.pdf  Caption sheets with the lighter stroke
    meihyo --dump-layout > layout.json       Print the built-in layout table")]
struct Cli {
    /// Roster CSV file (UTF-8 or Shift-JIS)
    #[arg(value_name = "INPUT", required_unless_present = "dump_layout")]
    input: Option<PathBuf>,

    /// Output PDF file, or output directory with --individual
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Write one PDF per entry instead of one combined document
    #[arg(long)]
    individual: bool,

    /// Sheet template: nameplate or caption
    #[arg(short, long, default_value = "nameplate")]
    template: Template,

    /// Primary font file (TTF, OTF or TTC)
    #[arg(long, value_name = "PATH", env = "MEIHYO_PRIMARY_FONT", default_value = DEFAULT_PRIMARY_FONT)]
    primary_font: PathBuf,

    /// Face index inside a primary font collection
    #[arg(long, value_name = "N", default_value_t = 0)]
    primary_index: u32,

    /// Fallback font for characters the primary face lacks
    #[arg(long, value_name = "PATH", env = "MEIHYO_FALLBACK_FONT", default_value = DEFAULT_FALLBACK_FONT)]
    fallback_font: PathBuf,

    /// Face index inside a fallback font collection
    #[arg(long, value_name = "N", default_value_t = 0)]
    fallback_index: u32,

    /// Layout table (JSON) replacing the built-in one
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Print the layout table as JSON and exit
    #[arg(long)]
    dump_layout: bool,

    /// Draw glyphs without the emulated bold stroke
    #[arg(long)]
    no_bold: bool,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = if cli.dump_layout {
        dump_layout(cli.layout.as_deref())
    } else {
        run(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_layout(path: Option<&Path>) -> meihyo::Result<LayoutTable> {
    match path {
        Some(path) => LayoutTable::load(path),
        None => Ok(LayoutTable::standard()),
    }
}

fn dump_layout(path: Option<&Path>) -> meihyo::Result<()> {
    let layout = load_layout(path)?;
    println!("{}", layout.to_json()?);
    Ok(())
}

fn run(cli: &Cli) -> meihyo::Result<()> {
    let Some(input) = cli.input.as_deref() else {
        return Ok(());
    };

    let records = read_table(input)?;
    if records.is_empty() {
        log::warn!("{} has no data rows, nothing to write", input.display());
        return Ok(());
    }
    let entries: Vec<Entry> = records.iter().map(Entry::from_raw).collect();

    let fonts = FontPaths {
        primary: FontSource::new(&cli.primary_font).with_index(cli.primary_index),
        fallback: FontSource::new(&cli.fallback_font).with_index(cli.fallback_index),
    };
    let config = RenderConfig::new()
        .with_template(cli.template)
        .with_bold(!cli.no_bold)
        .with_fonts(fonts)
        .with_layout(load_layout(cli.layout.as_deref())?);
    let exporter = SheetExporter::open(config)?;

    if cli.individual {
        let dir = cli
            .output
            .clone()
            .unwrap_or_else(|| default_individual_dir(input));
        let written = exporter.write_individual(&entries, &dir)?;
        if !cli.quiet {
            println!("{} files written to {}", written.len(), dir.display());
        }
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_combined_output(input));
        exporter.write_combined(&entries, &output)?;
        if !cli.quiet {
            println!("{}", output.display());
        }
    }

    Ok(())
}
