use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;
use harness_core::{
    ArgumentSpec, ArgumentTable, Handler, HandlerCommand, HandlerOptions, HandlerOutcome,
    HarnessError, ParsedArguments, Result, Scope,
};
use serde::Serialize;
use uuid::Uuid;

use crate::config::HarnessConfig;

pub const NAME: &str = "harness_submit";

const PARTS: &str = "PARTS";

/// Parts a submission may name, in submission order.
pub const KNOWN_PARTS: &[&str] = &["build", "test"];

/// `harness_submit`: print a submission summary for the requested parts.
pub struct SubmitCommand {
    config: Rc<HarnessConfig>,
}

impl SubmitCommand {
    pub fn new(config: Rc<HarnessConfig>) -> Self {
        Self { config }
    }
}

/// Requested parts, validated. No parts (or an empty PARTS) means all of them.
fn resolve_parts(requested: Option<&[String]>) -> Result<Vec<String>> {
    let requested = match requested {
        Some(parts) if !parts.is_empty() => parts,
        _ => return Ok(KNOWN_PARTS.iter().map(|p| p.to_string()).collect()),
    };

    let mut parts = Vec::new();
    for part in requested {
        if !KNOWN_PARTS.contains(&part.as_str()) {
            return Err(HarnessError::Initialization(format!(
                "unknown submit part \"{}\" (expected one of: {})",
                part,
                KNOWN_PARTS.join(", ")
            )));
        }
        if !parts.contains(part) {
            parts.push(part.clone());
        }
    }
    Ok(parts)
}

impl HandlerCommand for SubmitCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn extend_arguments(&self, table: ArgumentTable) -> ArgumentTable {
        table.with(ArgumentSpec::multi(PARTS))
    }

    fn initialize_handler(
        &self,
        args: &ParsedArguments,
        options: &HandlerOptions,
        _scope: &Scope,
    ) -> Result<Box<dyn Handler>> {
        let parts = resolve_parts(args.values(PARTS))?;
        Ok(Box::new(SubmitHandler {
            project: self.config.project.name.clone(),
            parts,
            options: options.clone(),
        }))
    }
}

#[derive(Debug, Serialize)]
struct Submission<'a> {
    project: &'a str,
    run_id: String,
    timestamp: String,
    build_dir: &'a PathBuf,
    source_dir: Option<&'a PathBuf>,
    parts: &'a [String],
    submit_index: Option<u32>,
    append: bool,
}

struct SubmitHandler {
    project: String,
    parts: Vec<String>,
    options: HandlerOptions,
}

impl SubmitHandler {
    fn submission(&self) -> Submission<'_> {
        Submission {
            project: &self.project,
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            build_dir: &self.options.build_dir,
            source_dir: self.options.source_dir.as_ref(),
            parts: &self.parts,
            submit_index: self.options.submit_index,
            append: self.options.append,
        }
    }
}

impl Handler for SubmitHandler {
    fn name(&self) -> &str {
        "submit"
    }

    fn execute(&mut self) -> Result<HandlerOutcome> {
        let submission = self.submission();
        let json = serde_json::to_string_pretty(&submission)
            .map_err(|e| HarnessError::Execution(format!("cannot encode submission: {}", e)))?;

        if !self.options.quiet {
            println!("{}", json);
        }

        Ok(HandlerOutcome::success().with_result(submission.run_id))
    }
}
