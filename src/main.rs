use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use colored::*;
use std::path::PathBuf;

use sysmon::commands;

fn build_cli() -> Command {
    Command::new("sysmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Real-time system resource monitor with threshold alerts")
        .arg(
            Arg::new("config")
                .value_name("CONFIG")
                .help("Path to YAML configuration file (default: config/default_config.yaml)")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON object per tick instead of the dashboard")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Sample once, print the result and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Diagnostic log level (error, warn, info, debug, trace); RUST_LOG overrides")
                .value_parser(clap::value_parser!(log::LevelFilter))
                .default_value("info"),
        )
        .after_help(
            "Examples:\n  sysmon\n  sysmon config/profiles/server.yaml\n  sysmon --once --json",
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    if let Err(e) = commands::monitor(&matches) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
