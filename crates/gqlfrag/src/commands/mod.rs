mod check;
mod compose;
mod validate;

use crate::GlobalArgs;
use crate::CommandResult;
use crate::RunnableCommand;
use check::CheckCmd;
use compose::ComposeCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlfrag")]
pub(crate) enum CommandEnum {
    /// Load fragment documents and check that every spread resolves and no
    /// spreads form a cycle.
    Check(Box<CheckCmd>),

    /// Compose a root query with its fragments into a query document.
    Compose(Box<ComposeCmd>),

    /// Validate a JSON payload against a fragment's shape.
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, globals: &GlobalArgs) -> CommandResult {
        match self {
            Self::Check(cmd) => cmd.run(globals).await,
            Self::Compose(cmd) => cmd.run(globals).await,
            Self::Validate(cmd) => cmd.run(globals).await,
        }
    }
}
