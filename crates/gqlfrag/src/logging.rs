use tracing::Level;

pub(crate) const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";

const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// `--verbose` forces DEBUG. Otherwise `LOG_LEVEL` picks the level
/// (case-insensitive; `verbose` is an alias for `debug`), defaulting to INFO.
///
/// An unrecognized `LOG_LEVEL` falls back to the default and comes back as a
/// warning, to be logged once the subscriber is installed.
pub(crate) fn resolve_log_level(
    verbose: bool,
    env_value: Option<&str>,
) -> (Level, Option<String>) {
    if verbose {
        return (Level::DEBUG, None);
    }

    let Some(value) = env_value.map(str::trim).filter(|value| !value.is_empty()) else {
        return (DEFAULT_LOG_LEVEL, None);
    };
    if value.eq_ignore_ascii_case("verbose") {
        return (Level::DEBUG, None);
    }
    match value.parse::<Level>() {
        Ok(level) => (level, None),
        Err(_) => (
            DEFAULT_LOG_LEVEL,
            Some(format!(
                "Ignoring unrecognized `{LOG_LEVEL_ENV_VAR}` value `{value}`; \
                logging at `{DEFAULT_LOG_LEVEL}`.",
            )),
        ),
    }
}

pub(crate) fn setup_logger(verbose: bool) {
    let env_value = std::env::var(LOG_LEVEL_ENV_VAR).ok();
    let (log_level, warning) = resolve_log_level(verbose, env_value.as_deref());

    // Logs stay on stderr; stdout carries composed documents.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    tracing::trace!("Logging at `{log_level}`.");

    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }
}
