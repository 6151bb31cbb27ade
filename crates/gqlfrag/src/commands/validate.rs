use crate::GlobalArgs;
use crate::CommandResult;
use crate::FragmentSources;
use crate::RunnableCommand;
use crate::output_utils;
use anyhow::Context;
use gqlfrag_core::ShapeValidator;
use gqlfrag_core::ValidationOptions;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        help="Reject payload keys the fragment doesn't select.",
        long,
    )]
    deny_unknown_fields: bool,

    #[arg(
        help="Name of the registered fragment the payload should conform to.",
        long,
        value_name="NAME",
    )]
    fragment: String,

    #[arg(
        help="JSON file holding the payload to validate.",
        long,
        value_name="FILE",
    )]
    payload: PathBuf,

    #[command(flatten)]
    sources: FragmentSources,
}

impl ValidateCmd {
    fn read_payload(&self) -> anyhow::Result<serde_json::Value> {
        let content = std::fs::read_to_string(&self.payload).with_context(|| format!(
            "Failed to read payload from {}",
            self.payload.display(),
        ))?;
        serde_json::from_str(&content).with_context(|| format!(
            "Payload in {} is not valid JSON",
            self.payload.display(),
        ))
    }
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _globals: &GlobalArgs) -> CommandResult {
        let loaded = match self.sources.load() {
            Ok(loaded) => loaded,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };
        let payload = match self.read_payload() {
            Ok(payload) => payload,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };

        let validator = ShapeValidator::with_options(&loaded.registry, ValidationOptions {
            deny_unknown_fields: self.deny_unknown_fields,
        });
        match validator.validate(&self.fragment, &payload) {
            Ok(()) => CommandResult::success(format_args!(
                "{} Payload in {} conforms to fragment `{}`.",
                output_utils::GREEN_CHECK,
                self.payload.display(),
                self.fragment,
            )),

            Err(e) => CommandResult::failure(format_args!(
                "{} Payload in {} does not conform to fragment `{}`: {e}",
                output_utils::RED_X,
                self.payload.display(),
                self.fragment,
            )),
        }
    }
}
