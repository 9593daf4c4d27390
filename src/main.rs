//! # Verilab - A Tabbed Verilog Editor
//!
//! Edit Verilog in tabs and send it to a compile/simulate backend.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Open a file in the first tab
//! cargo run -- path/to/design.v
//!
//! # Simulate a file without the GUI
//! cargo run -- run path/to/design.v --backend http://localhost:5000
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verilab_client::CompilerClient;
use verilab_core::{library, Config, Session, Verdict};
use verilab_ui::{run, Flags};

/// Verilab - edit, compile and simulate Verilog
#[derive(Parser, Debug)]
#[command(name = "verilab")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open in the first tab
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(short, long, value_name = "URL", global = true)]
    backend: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Cmd {
    /// Compile and simulate a file, then print the output
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check that the backend is reachable
    Check,
    /// List the built-in examples
    Examples,
    /// Write the current settings to the default config file
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Verilab v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    match args.command {
        None => {
            let flags = Flags {
                file: args.file,
                config,
            };
            run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Cmd::Run { file }) => runtime()?.block_on(run_headless(&config, &file)),
        Some(Cmd::Check) => runtime()?.block_on(check(&config)),
        Some(Cmd::Examples) => {
            for name in library::names() {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Cmd::InitConfig { force }) => {
            let path = Config::default_path()?;
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to replace it)", path.display());
            }
            config.save()?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(url) = &args.backend {
        config.backend.url = url.clone();
    }
    Ok(config)
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

/// Submits a file through a one-tab session, exactly as the GUI would.
async fn run_headless(config: &Config, file: &Path) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    session.create_tab("");
    session.import_file(file)?;

    let (ticket, code) = session.begin_submission()?;
    let client = CompilerClient::from_config(&config.backend);
    let (ticket, result) = client.submit(ticket, code).await;

    let completion =
        session.complete_submission(ticket, result, config.submission.attribution);
    println!("{}", completion.display);

    Ok(match completion.verdict {
        Verdict::Success => ExitCode::SUCCESS,
        Verdict::Failure => ExitCode::FAILURE,
    })
}

async fn check(config: &Config) -> anyhow::Result<ExitCode> {
    let client = CompilerClient::from_config(&config.backend);
    match client.probe().await {
        Ok(()) => {
            println!("Backend reachable at {}", client.base_url());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Server not reachable at {}: {}", client.base_url(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["verilab"]);
        assert!(args.file.is_none());
        assert!(args.command.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_file() {
        let args = Args::parse_from(["verilab", "top.v"]);
        assert_eq!(args.file, Some(PathBuf::from("top.v")));
    }

    #[test]
    fn test_run_subcommand_with_backend() {
        let args = Args::parse_from(["verilab", "run", "top.v", "--backend", "http://sim:9000", "-vv"]);
        assert_eq!(args.command, Some(Cmd::Run { file: PathBuf::from("top.v") }));
        assert_eq!(args.backend.as_deref(), Some("http://sim:9000"));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_init_config_subcommand() {
        let args = Args::parse_from(["verilab", "init-config", "--backend", "http://sim:9000"]);
        assert_eq!(args.command, Some(Cmd::InitConfig { force: false }));

        let args = Args::parse_from(["verilab", "init-config", "--force"]);
        assert_eq!(args.command, Some(Cmd::InitConfig { force: true }));
    }

    #[test]
    fn test_backend_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend]\nurl = \"http://from-file:1\"\n").unwrap();

        let args = Args::parse_from(["verilab", "--config", path.to_str().unwrap()]);
        assert_eq!(load_config(&args).unwrap().backend.url, "http://from-file:1");

        let args = Args::parse_from([
            "verilab",
            "--config",
            path.to_str().unwrap(),
            "--backend",
            "http://cli:2",
        ]);
        assert_eq!(load_config(&args).unwrap().backend.url, "http://cli:2");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["verilab", "--config", "/nonexistent/verilab.toml"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_headless_run_against_unreachable_backend_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.v");
        std::fs::write(&path, "module top; endmodule").unwrap();

        let mut config = Config::default();
        config.backend.url = "http://127.0.0.1:9".to_string();
        config.backend.request_timeout_secs = 2;

        let code = runtime().unwrap().block_on(run_headless(&config, &path)).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }
}
