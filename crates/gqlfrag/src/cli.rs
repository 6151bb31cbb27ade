use crate::CommandResult;
use crate::commands;
use clap::CommandFactory;

/// Flags accepted before or after any subcommand.
#[derive(clap::Args, Clone, Debug, Default)]
pub(crate) struct GlobalArgs {
    #[arg(
        global=true,
        help="Log at debug level, regardless of `LOG_LEVEL`.",
        long,
        short='v',
    )]
    pub(crate) verbose: bool,
}

#[derive(clap::Parser, Debug)]
#[command(
    about="Check, compose, and validate GraphQL fragments.",
    name="gqlfrag",
    version,
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[command(flatten)]
    pub(crate) globals: GlobalArgs,
}
impl Cli {
    /// Runs the chosen subcommand, or prints usage when there is none.
    pub(crate) async fn run(self) -> CommandResult {
        match self.cmd {
            Some(cmd) => cmd.run(&self.globals).await,
            None => CommandResult::success(format_args!(
                "{}",
                Self::command().render_help(),
            )),
        }
    }
}
