//! Gateway entry point: load configuration, bring up logging, report.

use std::process::ExitCode;

use clap::Parser;

use mcp_mesh::logging::field;
use mcp_mesh::{config, logging};

#[derive(Parser)]
#[command(name = "mcp-mesh")]
#[command(about = "Gateway routing calls to named MCP backend targets", long_about = None)]
struct Cli {
    /// Path of the configuration document.
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // No meaningful degraded mode exists without configuration or
    // logging; both failures end the process here with a diagnostic.
    let cfg = match config::init(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("mcp-mesh: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init(&cfg.log) {
        eprintln!("mcp-mesh: {err}");
        return ExitCode::FAILURE;
    }

    logging::info(
        "configuration loaded",
        &[
            field("config_path", cli.config.as_str()),
            field("port", cfg.server.port),
            field("targets", cfg.mcp_config.len() as u64),
        ],
    );
    println!("{cfg:#?}");

    logging::sync();
    ExitCode::SUCCESS
}
