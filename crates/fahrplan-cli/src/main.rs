// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;

use anyhow::{Context, Result};
use config::Config;
use fahrplan_app::{AppState, build_entries, initial_selection};
use fahrplan_schedule::Loader;
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }
    if options.show_version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::load(&options.config_path)
        .with_context(|| format!("load config {}", options.config_path.display()))?;
    let loader = Loader::new(config.url(), config.cache_path()?);

    if options.update {
        println!("Downloading schedule to {}...", loader.cache_path().display());
        loader.update()?;
    }

    let schedule = loader
        .load()
        .context("load schedule; run `fahrplan --update` to re-download it")?;
    let entries = build_entries(&schedule);
    let initial = initial_selection(&entries, OffsetDateTime::now_utc());

    let mut state = AppState::default();
    fahrplan_tui::run_app(&mut state, entries, initial)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    update: bool,
    show_help: bool,
    show_version: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        update: false,
        show_help: false,
        show_version: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--update" | "-u" => {
                options.update = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            "--version" | "-v" => {
                options.show_version = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("Usage: fahrplan [options]");
    println!();
    println!("Options:");
    println!("  --config <path>  Use a specific config path");
    println!("  --update, -u     Update the schedule with new changes");
    println!("  --version, -v    Show version");
    println!("  --help, -h       Show this help");
}
