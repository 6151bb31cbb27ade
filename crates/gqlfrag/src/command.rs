use crate::CommandResult;
use crate::GlobalArgs;

pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, globals: &GlobalArgs) -> CommandResult;
}
