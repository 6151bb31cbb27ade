use crate::GlobalArgs;
use crate::CommandResult;
use crate::FragmentSources;
use crate::RunnableCommand;
use crate::output_utils;
use anyhow::Context;
use gqlfrag_core::ComposeOptions;
use gqlfrag_core::QueryComposer;
use gqlfrag_core::RootQuery;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ComposeCmd {
    #[arg(
        help="Insert `__typename` into every nested selection set.",
        long,
    )]
    add_typename: bool,

    #[arg(
        help="Additional fragments to include even if the root selection \
             doesn't spread them.",
        long="fragment",
        value_name="NAME",
    )]
    fragments: Vec<String>,

    #[arg(
        help="Print the JSON request body instead of the query document.",
        long,
    )]
    json: bool,

    #[arg(
        help="Name to give the composed query operation, replacing the root \
             query's own name.",
        long,
    )]
    operation_name: Option<String>,

    #[arg(
        help="File holding the root query (`{ ... }` or a single query \
             operation, with any variables it declares). Use `-` to read it \
             from stdin.",
        long,
        value_name="FILE",
    )]
    root: PathBuf,

    #[arg(
        help="JSON file holding an object of variable values to include in \
             the request body. Only used with --json.",
        long,
        requires="json",
        value_name="FILE",
    )]
    variables: Option<PathBuf>,

    #[command(flatten)]
    sources: FragmentSources,
}

impl ComposeCmd {
    fn read_root(&self) -> anyhow::Result<RootQuery> {
        let source =
            if self.root == Path::new("-") {
                std::io::read_to_string(std::io::stdin())
                    .context("Failed to read the root query from stdin")?
            } else {
                std::fs::read_to_string(&self.root).with_context(|| format!(
                    "Failed to read the root query from {}",
                    self.root.display(),
                ))?
            };

        RootQuery::parse(source).map_err(|errors| anyhow::anyhow!(
            "Invalid root query:\n{}",
            output_utils::format_error_list(&errors),
        ))
    }

    fn read_variables(
        &self,
        root: &RootQuery,
    ) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
        let Some(path) = &self.variables else {
            return Ok(serde_json::Map::new());
        };
        let content = std::fs::read_to_string(path).with_context(|| format!(
            "Failed to read variables from {}",
            path.display(),
        ))?;
        let variables = match serde_json::from_str::<serde_json::Value>(&content).with_context(|| format!(
            "Variables in {} are not valid JSON",
            path.display(),
        ))? {
            serde_json::Value::Object(variables) => variables,
            _ => anyhow::bail!("Variables in {} must be a JSON object", path.display()),
        };

        if let Some(undeclared) = variables.keys()
            .find(|name| root.variable_definition(name).is_none()) {
            anyhow::bail!(
                "Variable `${undeclared}` in {} is not declared by the root query",
                path.display(),
            );
        }
        Ok(variables)
    }
}

#[inherent::inherent]
impl RunnableCommand for ComposeCmd {
    pub async fn run(self, _globals: &GlobalArgs) -> CommandResult {
        let loaded = match self.sources.load() {
            Ok(loaded) => loaded,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };
        let root = match self.read_root() {
            Ok(root) => root,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };

        let composer = QueryComposer::with_options(&loaded.registry, ComposeOptions {
            add_typename: self.add_typename,
            operation_name: self.operation_name.clone(),
        });
        let fragment_names: Vec<&str> = self.fragments.iter().map(String::as_str).collect();
        let composed = match composer.compose(&root, &fragment_names) {
            Ok(composed) => composed,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };
        log::debug!(
            "Composed query includes fragments: {}",
            composed.fragment_names().join(", "),
        );

        if !self.json {
            // `println!` adds the final newline back.
            let document = composed.to_document_string();
            return CommandResult::success(format_args!("{}", document.trim_end()));
        }

        let variables = match self.read_variables(&root) {
            Ok(variables) => variables,
            Err(e) => return CommandResult::failure(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };
        match serde_json::to_string_pretty(&composed.to_request(variables)) {
            Ok(body) => CommandResult::success(format_args!("{body}")),
            Err(e) => CommandResult::failure(format_args!(
                "{} Failed to serialize the request body: {e}",
                output_utils::RED_X,
            )),
        }
    }
}
