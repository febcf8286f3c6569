// jack-analyzer: Jack syntax analyzer with an interactive parse-tree viewer

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jack_analyzer::analyzer::{is_jack_source, Analyzer};
use jack_analyzer::cli::AnalyzerArgs;
use jack_analyzer::ui::App;

fn main() -> anyhow::Result<ExitCode> {
    let args = AnalyzerArgs::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if args.view {
        view(&args)?;
        return Ok(ExitCode::SUCCESS);
    }

    let analyzer = Analyzer::new(args.analyzer_config());
    let report = analyzer.run(&args.path)?;

    info!(
        analyzed = report.analyzed.len(),
        failed = report.failed.len(),
        "done"
    );

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        let total = report.failed.len() + report.analyzed.len();
        error!("{} of {} units failed", report.failed.len(), total);
        Ok(ExitCode::FAILURE)
    }
}

/// Parse a single file and browse its tree in the terminal.
fn view(args: &AnalyzerArgs) -> anyhow::Result<()> {
    let path: &Path = &args.path;
    if !is_jack_source(path) {
        bail!("--view expects a single .jack file, got {}", path.display());
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let analyzer = Analyzer::new(args.analyzer_config());
    let (tokens, tree) = analyzer
        .analyze_text(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(tokens = tokens.len(), nodes = tree.node_count(), "parsed");

    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(title, source, tree);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}
