use std::path::PathBuf;

use clap::{ArgAction, Parser};
use harness_core::{BINARY_DIRECTORY_VAR, SOURCE_DIRECTORY_VAR};

/// Command line arguments for the harness CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Run build/test harness scripts")]
pub struct Cli {
    /// Script to run
    pub script: PathBuf,

    /// Project configuration file (TOML). Defaults to harness.toml next to the script
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Define a script variable, repeatable
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    pub defines: Vec<String>,

    /// Build directory used when a command has no BUILD argument
    #[arg(short = 'B', long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Source directory used when a command has no SOURCE argument
    #[arg(short = 'S', long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

/// Log verbosity for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Debug,
}

/// Settings for one script run, validated from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub script: PathBuf,
    pub config_path: Option<PathBuf>,

    /// Variables seeded into the script scope, in command line order
    pub defines: Vec<(String, String)>,

    pub log_level: LogLevel,
}

impl Cli {
    /// Convert CLI arguments to RunOptions
    pub fn into_run_options(self) -> Result<RunOptions, String> {
        let mut defines = Vec::new();

        if let Some(dir) = &self.build_dir {
            defines.push((BINARY_DIRECTORY_VAR.to_string(), dir.display().to_string()));
        }
        if let Some(dir) = &self.source_dir {
            defines.push((SOURCE_DIRECTORY_VAR.to_string(), dir.display().to_string()));
        }

        for define in &self.defines {
            let (name, value) = define
                .split_once('=')
                .ok_or_else(|| format!("Invalid define '{}': expected NAME=VALUE", define))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("Invalid define '{}': empty variable name", define));
            }
            defines.push((name.to_string(), value.to_string()));
        }

        let log_level = if self.quiet {
            LogLevel::Quiet
        } else if self.verbose > 0 {
            LogLevel::Debug
        } else {
            LogLevel::Normal
        };

        let config_path = self.config.or_else(|| {
            let candidate = self
                .script
                .parent()
                .map(|dir| dir.join("harness.toml"))
                .unwrap_or_else(|| PathBuf::from("harness.toml"));
            candidate.is_file().then_some(candidate)
        });

        Ok(RunOptions {
            script: self.script,
            config_path,
            defines,
            log_level,
        })
    }
}
