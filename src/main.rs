use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use widgetscope::analyzer::GuiAnalyzer;
use widgetscope::config::AnalyzerConfig;
use widgetscope::report::{render_json, render_text};

/// Static analysis for PySide6/PyQt6 UI files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Python UI file to analyze. Parsed only, never imported or run.
    file: PathBuf,

    /// Output JSON instead of the formatted report.
    ///
    /// The JSON carries widgets, issues, statistics and best practices;
    /// spatial findings are text-only.
    #[arg(long)]
    json: bool,

    /// YAML configuration file (extra widget types, thresholds).
    ///
    /// Missing keys fall back to the built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional widget class to recognize. May be repeated.
    #[arg(long = "widget-type", value_name = "NAME")]
    widget_types: Vec<String>,

    /// Log analysis progress to stderr. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Analysis results are data: any number of issues still exits 0.
/// Errors propagate out of `main` and exit non-zero.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    }
    .with_widget_types(cli.widget_types);

    let analyzer = GuiAnalyzer::new(config);
    let result = analyzer.analyze(&cli.file)?;

    if cli.json {
        println!("{}", render_json(&result)?);
    } else {
        let mut stdout = io::stdout().lock();
        render_text(&mut stdout, &result)?;
        stdout.flush()?;
    }

    Ok(())
}
