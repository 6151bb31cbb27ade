use crate::GlobalArgs;
use crate::CommandResult;
use crate::FragmentSources;
use crate::LoadedFragments;
use crate::RunnableCommand;
use crate::output_utils;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[command(flatten)]
    sources: FragmentSources,
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub async fn run(self, _globals: &GlobalArgs) -> CommandResult {
        let LoadedFragments {
            file_paths,
            num_skipped_files,
            registry,
        } = match self.sources.load() {
            Ok(loaded) => loaded,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };

        if let Err(errors) = registry.check_integrity() {
            return CommandResult::failure(format_args!(
                "{} Fragment integrity errors ({}):\n{}",
                output_utils::RED_X,
                errors.len(),
                output_utils::format_error_list(&errors),
            ));
        }

        CommandResult::success(format_args!(
            concat!(
                "{} All fragments checked successfully:\n",
                "  * Analyzed {} files.\n",
                "  * Skipped {} non-graphql files.\n",
                "  * Registered {} fragments.",
            ),
            output_utils::GREEN_CHECK,
            file_paths.len(),
            num_skipped_files,
            registry.len(),
        ))
    }
}
