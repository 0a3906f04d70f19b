//! Termfolio CLI
//!
//! A terminal portfolio with a falling-glyph background.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use termfolio::tui::App;
use termfolio::{TermfolioConfig, ThemeMode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Termfolio - browse a developer portfolio from the terminal
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start in this theme (dark or light)
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// Disable the rain background
    #[arg(long)]
    no_rain: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Where to write logs (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().or_else(default_log_path);
    if let Some(path) = &log_path {
        init_logging(path, cli.verbose)?;
    }

    let mut config = match &cli.config {
        Some(path) => TermfolioConfig::load(path)?,
        None => TermfolioConfig::load_default()?,
    };
    if let Some(theme) = cli.theme {
        config = config.with_theme(theme);
    }
    if cli.no_rain {
        config = config.with_rain_enabled(false);
    }

    info!(
        theme = %config.theme,
        rain = config.rain.enabled,
        "Starting termfolio"
    );

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}

/// `<cache_dir>/termfolio/termfolio.log`
fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("termfolio").join("termfolio.log"))
}

fn init_logging(path: &Path, verbose: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    if verbose && std::env::var_os("RUST_LOG").is_some() {
        warn!("RUST_LOG is set; --verbose has no effect");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "termfolio",
            "--theme",
            "light",
            "--no-rain",
            "-v",
            "--config",
            "/tmp/termfolio.toml",
        ]);
        assert_eq!(cli.theme, Some(ThemeMode::Light));
        assert!(cli.no_rain);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/termfolio.toml")));
    }

    #[test]
    fn test_cli_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["termfolio", "--theme", "neon"]).is_err());
    }

    #[test]
    fn test_default_log_path() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("termfolio/termfolio.log"));
        }
    }
}
