mod app;
mod collectors;
mod config;
mod engine;
mod input;
mod logging;
mod models;
mod ui;
mod util;

use anyhow::{bail, Context, Result};
use app::App;
use clap::{ArgGroup, CommandFactory, Parser};
use collectors::storage::{StatvfsProvider, StorageInfoProvider};
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use engine::{FillerEngine, GenerationRequest};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use tracing::info;
use util::human::{fmt_bytes, fmt_gb};
use util::user_state::UserState;

#[derive(Parser, Debug)]
#[command(
    name = "spaceeater",
    about = "Fill and free local storage on purpose with filler files",
    version,
    group(ArgGroup::new("mode").args(["status", "json", "generate", "delete", "delete_all", "config", "completions"])),
)]
struct Cli {
    /// Directory the filler files live in (overrides the config file)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Print eaten space and device capacity, then exit
    #[arg(long)]
    status: bool,

    /// Print a one-shot JSON snapshot, then exit
    #[arg(long)]
    json: bool,

    /// Write filler files, then exit
    #[arg(long)]
    generate: bool,

    /// Number of files to generate (default: last used)
    #[arg(long, requires = "generate")]
    count: Option<usize>,

    /// Bytes per file, rounded down to a multiple of 10 (default: last used)
    #[arg(long, value_name = "BYTES", requires = "generate")]
    size: Option<f64>,

    /// Delete up to N entries from the filler directory, then exit
    #[arg(long, value_name = "N")]
    delete: Option<usize>,

    /// Delete every entry in the filler directory, then exit
    #[arg(long)]
    delete_all: bool,

    /// Confirm --delete-all
    #[arg(long, requires = "delete_all")]
    yes: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print shell completions, then exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

impl Cli {
    fn is_one_shot(&self) -> bool {
        self.status || self.json || self.generate || self.delete.is_some() || self.delete_all || self.config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "spaceeater", &mut io::stdout());
        return Ok(());
    }

    logging::init(if cli.is_one_shot() { logging::Sink::Stderr } else { logging::Sink::File })?;

    let mut cfg = Config::load();
    if let Some(dir) = cli.dir.clone() {
        cfg.storage.working_dir = Some(dir);
    }

    let engine = FillerEngine::new(cfg.storage.resolved_working_dir())
        .follow_symlinks(cfg.storage.follow_symlinks);
    let provider = StatvfsProvider::new(cfg.storage.resolved_volume_path(), cfg.storage.opportunistic_reserve_pct);

    if cli.status {
        return run_status(&engine, &provider);
    }
    if cli.json {
        return run_json_snapshot(&engine, &provider);
    }
    if cli.generate {
        return run_generate(&engine, &cfg, cli.count, cli.size);
    }
    if let Some(n) = cli.delete {
        return run_delete(&engine, Some(n));
    }
    if cli.delete_all {
        if !cli.yes {
            bail!("refusing to delete every entry in {} without --yes", engine.dir().display());
        }
        return run_delete(&engine, None);
    }
    if cli.config {
        return run_print_config(&cfg);
    }

    let prefs = UserState::load(&cfg.defaults);
    let theme_name = cli.theme.clone().unwrap_or_else(|| prefs.theme_name.clone());
    let theme = ui::theme::ThemeVariant::from_name(&theme_name);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let app = App::new(cfg, engine, Box::new(provider), prefs, theme);
    let result = run(app);
    restore_terminal()?;
    result
}

fn run_status(engine: &FillerEngine, provider: &dyn StorageInfoProvider) -> Result<()> {
    let usage = engine.usage();
    print!("{}", util::report::generate(engine.dir(), &usage, &provider.snapshot()));
    Ok(())
}

fn run_json_snapshot(engine: &FillerEngine, provider: &dyn StorageInfoProvider) -> Result<()> {
    let usage = engine.usage();
    let snapshot = util::report::json_snapshot(engine.dir(), &usage, &provider.snapshot());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_generate(engine: &FillerEngine, cfg: &Config, count: Option<usize>, size: Option<f64>) -> Result<()> {
    let prefs = UserState::load(&cfg.defaults);
    let req = GenerationRequest::new(
        count.unwrap_or(prefs.file_count),
        size.unwrap_or(prefs.file_size_bytes),
    )?;
    let report = engine.generate(&req)
        .with_context(|| format!("generating filler files in {}", engine.dir().display()))?;
    println!(
        "Generated {} file(s) of {} ({} total) in {}",
        report.files.len(), fmt_bytes(report.bytes_per_file),
        fmt_bytes(report.total_bytes()), engine.dir().display(),
    );
    println!("Eaten: {}", fmt_gb(engine.used_disk()));
    Ok(())
}

fn run_delete(engine: &FillerEngine, limit: Option<usize>) -> Result<()> {
    let report = match limit {
        Some(n) => engine.remove_count(n),
        None    => engine.remove_all(),
    }
    .with_context(|| format!("deleting from {}", engine.dir().display()))?;

    if report.count() == 0 {
        println!("Nothing to delete in {}", engine.dir().display());
    } else {
        for path in &report.removed {
            info!(path = %path.display(), "deleted");
        }
        println!("Deleted {} entr{}", report.count(), if report.count() == 1 { "y" } else { "ies" });
    }
    println!("Eaten: {}", fmt_gb(engine.used_disk()));
    Ok(())
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let s = &cfg.storage;
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  refresh_interval_ms       = {}", cfg.general.refresh_interval_ms);
    println!();
    println!("[storage]");
    println!("  working_dir               = {}", s.resolved_working_dir().display());
    println!("  volume_path               = {}", s.resolved_volume_path().display());
    println!("  opportunistic_reserve_pct = {}%", s.opportunistic_reserve_pct);
    println!("  follow_symlinks           = {}", s.follow_symlinks);
    println!();
    println!("[defaults]");
    println!("  file_count                = {}", cfg.defaults.file_count);
    println!("  file_size_bytes           = {}", cfg.defaults.file_size_bytes);
    if let Some(log) = logging::log_path() {
        println!();
        println!("Log file (TUI mode): {}", log.display());
    }
    Ok(())
}

fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    app.run(&mut term)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn modes_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["spaceeater", "--status", "--json"]).is_err());
        assert!(Cli::try_parse_from(["spaceeater", "--generate", "--delete", "2"]).is_err());
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from(["spaceeater", "--generate", "--count", "5", "--size", "105"]).unwrap();
        assert!(cli.generate);
        assert_eq!(cli.count, Some(5));
        assert_eq!(cli.size, Some(105.0));
        assert!(cli.is_one_shot());
    }

    #[test]
    fn count_requires_generate() {
        assert!(Cli::try_parse_from(["spaceeater", "--count", "5"]).is_err());
        assert!(Cli::try_parse_from(["spaceeater", "--yes"]).is_err());
    }

    #[test]
    fn bare_invocation_is_interactive() {
        let cli = Cli::try_parse_from(["spaceeater", "-t", "nord"]).unwrap();
        assert!(!cli.is_one_shot());
        assert_eq!(cli.theme.as_deref(), Some("nord"));
    }
}
