//! Fragments the orchestration dashboard renders its asset table and
//! schedule tick list from, each paired with a typed shape.

mod asset_table;
mod schedule_ticks;

pub use asset_table::ASSET_TABLE_DEFINITION_FRAGMENT;
pub use asset_table::ASSET_TABLE_FRAGMENT;
pub use asset_table::AssetKey;
pub use asset_table::AssetTableDefinition;
pub use asset_table::AssetTableFragment;
pub use asset_table::PartitionDefinition;
pub use asset_table::Repository;
pub use asset_table::RepositoryLocation;
pub use schedule_ticks::FutureInstigationTick;
pub use schedule_ticks::FutureInstigationTicks;
pub use schedule_ticks::InstigationState;
pub use schedule_ticks::InstigationStatus;
pub use schedule_ticks::SCHEDULE_FUTURE_TICKS_FRAGMENT;
pub use schedule_ticks::ScheduleFutureTicks;

use crate::DocumentLoadError;
use crate::FragmentRegistry;

/// Register every dashboard fragment.
pub fn register_dashboard_fragments(
    registry: &mut FragmentRegistry,
) -> Result<(), Vec<DocumentLoadError>> {
    let mut errors = vec![];
    for source in [
        ASSET_TABLE_DEFINITION_FRAGMENT,
        ASSET_TABLE_FRAGMENT,
        SCHEDULE_FUTURE_TICKS_FRAGMENT,
    ] {
        if let Err(mut source_errors) = registry.add_from_document_str(source, None) {
            errors.append(&mut source_errors);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(())
}
