use crate::logging::resolve_log_level;
use tracing::Level;

#[test]
fn defaults_to_info() {
    assert_eq!(resolve_log_level(false, None), (Level::INFO, None));
    assert_eq!(resolve_log_level(false, Some("  ")), (Level::INFO, None));
}

#[test]
fn env_level_is_case_insensitive_and_trimmed() {
    assert_eq!(resolve_log_level(false, Some("debug")), (Level::DEBUG, None));
    assert_eq!(resolve_log_level(false, Some(" WARN\n")), (Level::WARN, None));
    assert_eq!(resolve_log_level(false, Some("Trace")), (Level::TRACE, None));
    assert_eq!(resolve_log_level(false, Some("VERBOSE")), (Level::DEBUG, None));
}

#[test]
fn verbose_flag_wins_over_env() {
    assert_eq!(resolve_log_level(true, Some("error")), (Level::DEBUG, None));
    assert_eq!(resolve_log_level(true, Some("nonsense")), (Level::DEBUG, None));
}

#[test]
fn unrecognized_env_level_falls_back_with_a_warning() {
    let (level, warning) = resolve_log_level(false, Some("loud"));
    assert_eq!(level, Level::INFO);
    let warning = warning.unwrap();
    assert!(warning.contains("`LOG_LEVEL`"));
    assert!(warning.contains("`loud`"));
}
