/*!
Built-in handler commands.

Each command lives in its own file and exposes a `NAME` plus a type that
implements `HandlerCommand`:

  build.rs   harness_build   run the configured build command
  test.rs    harness_test    run configured test cases, filtered by regex
  submit.rs  harness_submit  print a submission summary as JSON

`process.rs` holds the shared child-process helpers.
*/

pub mod build;
pub mod process;
pub mod submit;

use std::rc::Rc;

use harness_core::{CommandRegistry, HandlerCommand};

use crate::config::HarnessConfig;

pub use build::BuildCommand;
pub use submit::SubmitCommand;
pub use test::TestCommand;

/// Registry with every built-in command, sharing one configuration.
pub fn builtin_registry(config: Rc<HarnessConfig>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    let cfg = config.clone();
    registry.register(build::NAME, move || {
        Box::new(BuildCommand::new(cfg.clone())) as Box<dyn HandlerCommand>
    });

    let cfg = config.clone();
    registry.register(test::NAME, move || {
        Box::new(TestCommand::new(cfg.clone())) as Box<dyn HandlerCommand>
    });

    registry.register(submit::NAME, move || {
        Box::new(SubmitCommand::new(config.clone())) as Box<dyn HandlerCommand>
    });

    registry
}
