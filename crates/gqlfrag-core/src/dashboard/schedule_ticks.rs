use crate::FragmentShape;
use serde::Deserialize;
use serde::Serialize;

pub const SCHEDULE_FUTURE_TICKS_FRAGMENT: &str = r#"
fragment ScheduleFutureTicksFragment on Schedule {
  id
  executionTimezone @nullable
  scheduleState {
    id
    status
  }
  futureTicks {
    results {
      timestamp
    }
  }
}
"#;

/// Upcoming ticks for one schedule.
///
/// `__typename` fields are only present when the query was composed with
/// [`ComposeOptions::add_typename`](crate::ComposeOptions::add_typename).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFutureTicks {
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    pub id: String,
    #[serde(default)]
    pub execution_timezone: Option<String>,
    pub schedule_state: InstigationState,
    pub future_ticks: FutureInstigationTicks,
}
impl FragmentShape for ScheduleFutureTicks {
    const FRAGMENT_NAME: &'static str = "ScheduleFutureTicksFragment";
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InstigationState {
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    pub id: String,
    pub status: InstigationStatus,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstigationStatus {
    DeclaredInCode,
    Running,
    Stopped,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FutureInstigationTicks {
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    pub results: Vec<FutureInstigationTick>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FutureInstigationTick {
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}
