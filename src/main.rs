//! `ccc-slides` - build CCC scripture slides from the command line.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use futures::future;
use tracing_subscriber::EnvFilter;

use ccc_slides::bible::parse_reference;
use ccc_slides::config::Config;
use ccc_slides::export::{self, ExportFormat};
use ccc_slides::layout::{build_presentation, build_service, Presentation, Slide};
use ccc_slides::services::{LiveTextSource, PlaceholderTextSource, VerseSource};

/// Turn scripture references into CCC-compliant presentation slides.
#[derive(Parser, Debug)]
#[command(name = "ccc-slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scripture references, e.g. "Mark 2:1-12"
    #[arg(required = true)]
    references: Vec<String>,

    /// Export formats: txt, rtf, pro (comma separated)
    #[arg(short, long, value_delimiter = ',', default_value = "txt")]
    format: Vec<String>,

    /// Output directory (default: CCC_OUTPUT_DIR or Documents/CCC Slides)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the first format to stdout instead of writing files
    #[arg(short, long)]
    print: bool,

    /// Use placeholder text even when an ESV API key is configured
    #[arg(long)]
    placeholder: bool,

    /// Build one service deck with this title from all references
    #[arg(short, long)]
    title: Option<String>,

    /// Print each compliance report as JSON
    #[arg(long)]
    report: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = &args.output {
        config.output_dir.clone_from(dir);
    }

    // Validate everything the user typed before touching the network
    let formats = args
        .format
        .iter()
        .map(|f| f.parse::<ExportFormat>())
        .collect::<Result<Vec<_>, _>>()?;
    if formats.is_empty() {
        anyhow::bail!("No export format given");
    }
    let references = args
        .references
        .iter()
        .map(|r| parse_reference(r))
        .collect::<Result<Vec<_>, _>>()?;

    let source = select_source(&config, args.placeholder)?;
    tracing::info!("Fetching {} passage(s) from the {} source", references.len(), source.name());
    let fetched = future::join_all(references.iter().map(|r| source.fetch(r))).await;

    let mut stdout = std::io::stdout().lock();
    let mut passages = Vec::with_capacity(references.len());
    for (reference, verses) in references.into_iter().zip(fetched) {
        let verses = verses.with_context(|| format!("Failed to fetch {}", reference.raw))?;
        passages.push((reference, verses));
    }

    if let Some(title) = &args.title {
        let service = build_service(title, &passages, &config.rules)?;
        for presentation in &service.passages {
            summarize(presentation);
            if args.report {
                serde_json::to_writer_pretty(&mut stdout, &presentation.report)?;
                writeln!(stdout)?;
            }
        }
        let stem = service.file_stem();
        return emit(&mut stdout, &args, &config, &formats, &service.slides, &service.title, &stem);
    }

    for (reference, verses) in &passages {
        let presentation = build_presentation(reference, verses, &config.rules)?;
        summarize(&presentation);

        if args.report {
            serde_json::to_writer_pretty(&mut stdout, &presentation.report)?;
            writeln!(stdout)?;
        }

        let stem = reference.file_stem();
        emit(&mut stdout, &args, &config, &formats, &presentation.slides, &reference.raw, &stem)?;
    }

    Ok(())
}

/// Print the first format, or write every format to the output directory.
fn emit(
    out: &mut impl Write,
    args: &Args,
    config: &Config,
    formats: &[ExportFormat],
    slides: &[Slide],
    title: &str,
    stem: &str,
) -> Result<()> {
    if args.print {
        if let Some(&format) = formats.first() {
            out.write_all(&export::export(slides, format, title)?)?;
        }
        return Ok(());
    }

    for &format in formats {
        let bytes = export::export(slides, format, title)?;
        let path = export::write_export(&config.output_dir, stem, format, &bytes)
            .with_context(|| format!("Failed to write {format} export for {title}"))?;
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ccc_slides={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Pick the verse source before the layout engine runs.
fn select_source(config: &Config, force_placeholder: bool) -> Result<Box<dyn VerseSource>> {
    if force_placeholder {
        return Ok(Box::new(PlaceholderTextSource::new()));
    }
    if !config.has_esv_credentials() {
        tracing::warn!("ESV_API_KEY not set - using placeholder text");
        return Ok(Box::new(PlaceholderTextSource::new()));
    }
    Ok(Box::new(LiveTextSource::new(config)?))
}

fn summarize(presentation: &Presentation) {
    let report = &presentation.report;
    if report.is_compliant {
        tracing::info!("{}: {}", presentation.reference.raw, report.recommendations.join(" "));
        return;
    }
    for line in &report.recommendations {
        tracing::warn!("{}: {line}", presentation.reference.raw);
    }
}
