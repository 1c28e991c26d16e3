use std::rc::Rc;

use harness_core::{
    ArgumentSpec, ArgumentTable, Handler, HandlerCommand, HandlerOptions, HandlerOutcome,
    HarnessError, ParsedArguments, Result, Scope,
};
use tracing::info;

use super::process;
use crate::config::HarnessConfig;

pub const NAME: &str = "harness_build";

/// Scope variable that overrides the configured build command.
pub const BUILD_COMMAND_VAR: &str = "HARNESS_BUILD_COMMAND";

const TARGET: &str = "TARGET";
const CONFIGURATION: &str = "CONFIGURATION";
const FLAGS: &str = "FLAGS";

/// `harness_build`: run the project's build command in the build directory.
pub struct BuildCommand {
    config: Rc<HarnessConfig>,
}

impl BuildCommand {
    pub fn new(config: Rc<HarnessConfig>) -> Self {
        Self { config }
    }
}

impl HandlerCommand for BuildCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn extend_arguments(&self, table: ArgumentTable) -> ArgumentTable {
        table
            .with(ArgumentSpec::single(TARGET))
            .with(ArgumentSpec::single(CONFIGURATION))
            .with(ArgumentSpec::multi(FLAGS))
    }

    fn initialize_handler(
        &self,
        args: &ParsedArguments,
        options: &HandlerOptions,
        scope: &Scope,
    ) -> Result<Box<dyn Handler>> {
        let line = scope
            .get(BUILD_COMMAND_VAR)
            .or(self.config.build.command.as_deref())
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| {
                HarnessError::Initialization(format!(
                    "no build command; set {} or build.command in the config",
                    BUILD_COMMAND_VAR
                ))
            })?;

        let mut argv = process::split_command_line(line)?;
        if let Some(flags) = args.values(FLAGS) {
            argv.extend(flags.iter().cloned());
        }

        let mut env = Vec::new();
        if let Some(target) = args.value(TARGET) {
            env.push(("HARNESS_TARGET".to_string(), target.to_string()));
        }
        if let Some(configuration) = args.value(CONFIGURATION) {
            env.push(("HARNESS_CONFIGURATION".to_string(), configuration.to_string()));
        }

        Ok(Box::new(BuildHandler {
            argv,
            env,
            options: options.clone(),
        }))
    }
}

struct BuildHandler {
    argv: Vec<String>,
    env: Vec<(String, String)>,
    options: HandlerOptions,
}

impl Handler for BuildHandler {
    fn name(&self) -> &str {
        "build"
    }

    fn execute(&mut self) -> Result<HandlerOutcome> {
        if !self.options.quiet {
            info!(command = %self.argv.join(" "), dir = %self.options.build_dir.display(), "building");
        }

        let code = process::run(&self.argv, &self.options.build_dir, &self.env, self.options.quiet)?;
        if code == 0 {
            Ok(HandlerOutcome::success().with_result("0"))
        } else {
            Ok(HandlerOutcome::failure(format!("build command exited with code {}", code))
                .with_result(code.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_core::{parse_arguments, resolve_options};

    fn initialize(config: HarnessConfig, scope: &Scope, tokens: &[&str]) -> Result<Box<dyn Handler>> {
        let command = BuildCommand::new(Rc::new(config));
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        let args = parse_arguments(&command.argument_table(), &tokens)?;
        let options = resolve_options(&args, scope)?;
        command.initialize_handler(&args, &options, scope)
    }

    #[test]
    fn missing_build_command_is_rejected() {
        let err = initialize(HarnessConfig::default(), &Scope::new(), &["BUILD", "out"])
            .err()
            .unwrap();
        assert!(matches!(err, HarnessError::Initialization(_)));
    }

    #[test]
    fn scope_overrides_config_command() {
        let mut config = HarnessConfig::default();
        config.build.command = Some("\"unbalanced".to_string());
        let mut scope = Scope::new();
        scope.set(BUILD_COMMAND_VAR, "make all");

        assert!(initialize(config, &scope, &["BUILD", "out", "FLAGS", "-j", "4"]).is_ok());
    }

    #[test]
    fn extra_keywords_parse() {
        let command = BuildCommand::new(Rc::new(HarnessConfig::default()));
        let tokens: Vec<String> = ["TARGET", "install", "CONFIGURATION", "Release", "FLAGS", "-k", "-j2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let args = parse_arguments(&command.argument_table(), &tokens).unwrap();
        assert_eq!(args.value(TARGET), Some("install"));
        assert_eq!(args.values(FLAGS).map(|v| v.len()), Some(2));
    }
}
