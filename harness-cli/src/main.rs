mod args;
mod commands;
mod config;
mod script;

use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use harness_core::Scope;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::{Cli, LogLevel};
use config::HarnessConfig;
use script::ScriptRunner;

fn init_tracing(level: LogLevel) {
    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match level {
            LogLevel::Debug => "harness=debug,harness_core=debug",
            LogLevel::Normal => "harness=info,harness_core=info",
            LogLevel::Quiet => "harness=error,harness_core=error",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let options = match cli.into_run_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    init_tracing(options.log_level);

    let config = match &options.config_path {
        Some(path) => match HarnessConfig::load(path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(ExitCode::from(2));
            }
        },
        None => HarnessConfig::default(),
    };

    let registry = commands::builtin_registry(Rc::new(config));

    let mut scope = Scope::new();
    for (name, value) in &options.defines {
        scope.set(name.as_str(), value.as_str());
    }

    let mut runner = ScriptRunner::new(&registry, scope);
    let report = match runner
        .run_file(&options.script)
        .with_context(|| format!("cannot read script {}", options.script.display()))
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(ExitCode::from(2));
        }
    };

    for error in &report.errors {
        eprintln!("{}", error);
    }
    info!(
        commands = report.commands,
        failed = report.failed,
        variables = runner.scope().variables().len(),
        "script finished"
    );

    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
