use std::process::ExitCode;

/// The outcome of a subcommand: a message for the user and whether it
/// succeeded. Successful output (composed documents, request bodies) goes to
/// stdout so it can be piped; failures go to stderr.
#[derive(Debug)]
pub(crate) struct CommandResult {
    message: String,
    succeeded: bool,
}

impl CommandResult {
    pub fn success(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            message: fmt_args.to_string(),
            succeeded: true,
        }
    }

    pub fn failure(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            message: fmt_args.to_string(),
            succeeded: false,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Print the message to the stream matching the outcome.
    pub fn emit(self) -> ExitCode {
        if self.succeeded() {
            println!("{}", self.message());
            ExitCode::SUCCESS
        } else {
            eprintln!("{}", self.message());
            ExitCode::FAILURE
        }
    }
}
