//! Linenav - A terminal line navigator with templated link generation.
//!
//! # Usage
//!
//! ```bash
//! linenav                      # reopen the last file at the last line
//! linenav list.txt             # start on the first line of list.txt
//! linenav --template 'https://example.com/search?q=[[my-data]]' list.txt
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use linenav::app::App;
use linenav::config::{
    ConfigFlags, clear_config_flags, default_state_path, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use linenav::link::{DEFAULT_MARKER, DEFAULT_TEMPLATE};
use linenav::session::FileStore;

/// A terminal line navigator with templated link generation
#[derive(Parser, Debug)]
#[command(name = "linenav", version, about, long_about = None)]
struct Cli {
    /// Text file to open (defaults to the last opened file)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Link template used when none has been saved
    #[arg(long, value_name = "TEMPLATE")]
    template: Option<String>,

    /// Placeholder in the template replaced by the current line
    #[arg(long, value_name = "MARKER")]
    marker: Option<String>,

    /// Where the session (last file, line and template) is stored
    #[arg(long, value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// Do not reopen the last file on startup
    #[arg(long)]
    no_restore: bool,

    /// Write logs to this file (set verbosity with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Build the log filter from `RUST_LOG`-style directives, defaulting to `warn`.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let builder = tracing_subscriber::fmt().with_env_filter(log_filter(&directives));

    // The UI owns the terminal, so logs only go to a file when asked for.
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::sink).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;

    // Verify file exists
    if let Some(file) = &cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    let state_path = effective.state_file.clone().unwrap_or_else(default_state_path);
    let store = FileStore::open(&state_path).unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable session store");
        FileStore::empty(state_path.clone())
    });

    // Run the application
    let mut app = App::new()
        .with_file(cli.file)
        .with_restore(!effective.no_restore)
        .with_template(effective.template.as_deref().unwrap_or(DEFAULT_TEMPLATE))
        .with_marker(effective.marker.as_deref().unwrap_or(DEFAULT_MARKER))
        .with_store(Box::new(store), Some(state_path))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
