mod cli;
mod command;
mod command_result;
mod commands;
mod fragment_sources;
mod logging;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use cli::GlobalArgs;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;
pub(crate) use fragment_sources::FragmentSources;
pub(crate) use fragment_sources::LoadedFragments;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    logging::setup_logger(cli.globals.verbose);

    cli.run().await.emit()
}

#[cfg(test)]
mod tests;
