use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ENV_VAR: &str = "SPACEEATER_LOG";
const DEFAULT_FILTER: &str = "spaceeater=info";

pub enum Sink {
    /// One-shot CLI modes: plain stderr.
    Stderr,
    /// TUI mode: append to a file so the screen stays clean.
    File,
}

pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("spaceeater").join("spaceeater.log"))
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| DEFAULT_FILTER.into())
}

pub fn init(sink: Sink) -> Result<()> {
    match sink {
        Sink::Stderr => {
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()
                .context("installing log subscriber")?;
        }
        Sink::File => {
            let Some(path) = log_path() else {
                // Nowhere to write; stay silent rather than draw over the TUI.
                return Ok(());
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)
                .with_context(|| format!("opening {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
                .context("installing log subscriber")?;
        }
    }
    Ok(())
}
