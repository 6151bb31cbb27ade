use crate::FragmentRegistry;
use crate::loc;
use indexmap::IndexSet;
use std::collections::HashSet;
use thiserror::Error;

impl FragmentRegistry {
    /// Whole-registry consistency check, meant to run once startup
    /// registration is finished.
    ///
    /// Reports spread cycles first, then spreads of fragments that were never
    /// registered. Each group of fragments that spread each other is reported
    /// through at least one of its cycles, given as the fragment names along
    /// the cycle rotated to start at the smallest name. The walk expands each
    /// fragment once, so registries with heavily shared fragments stay cheap
    /// to check.
    pub fn check_integrity(&self) -> Result<(), Vec<RegistryIntegrityError>> {
        let mut errors = self.find_cycles();
        errors.extend(self.find_undefined_references());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn find_cycles(&self) -> Vec<RegistryIntegrityError> {
        let mut walk = CycleWalk::default();
        for fragment_name in self.fragments.keys() {
            self.walk_for_cycles(fragment_name, &mut walk);
        }
        walk.errors
    }

    fn walk_for_cycles<'a>(&'a self, fragment_name: &'a str, walk: &mut CycleWalk<'a>) {
        if walk.finished.contains(fragment_name) {
            return;
        }

        // Spreading a fragment that is still on the current path closes a
        // cycle; the path before that fragment only leads into it.
        if let Some(cycle_start) = walk.on_path.get_index_of(fragment_name) {
            let mut cycle: Vec<String> = walk.on_path.iter()
                .skip(cycle_start)
                .map(|name| name.to_string())
                .collect();
            cycle.push(fragment_name.to_string());

            let cycle_path = normalize_cycle(&cycle);
            if walk.reported.insert(cycle_path.clone()) {
                walk.errors.push(RegistryIntegrityError::FragmentCycleDetected {
                    cycle_path,
                });
            }
            return;
        }

        // Undefined spreads are reported by `find_undefined_references`.
        let Some(fragment) = self.fragments.get(fragment_name) else {
            return;
        };

        walk.on_path.insert(fragment_name);
        for referenced in fragment.selection_set().referenced_fragment_names() {
            self.walk_for_cycles(referenced, walk);
        }
        walk.on_path.pop();
        walk.finished.insert(fragment_name);
    }

    fn find_undefined_references(&self) -> Vec<RegistryIntegrityError> {
        self.fragments.iter()
            .flat_map(|(fragment_name, fragment)| {
                fragment.selection_set().referenced_fragment_names()
                    .into_iter()
                    .filter(|referenced| !self.fragments.contains_key(*referenced))
                    .map(|referenced| RegistryIntegrityError::UndefinedFragmentReference {
                        fragment_name: fragment_name.to_string(),
                        fragment_location: fragment.def_location().clone(),
                        undefined_fragment: referenced.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Depth-first walk state. A fragment is `finished` once everything it
/// spreads has been walked; it is never walked again.
#[derive(Default)]
struct CycleWalk<'a> {
    errors: Vec<RegistryIntegrityError>,
    finished: HashSet<&'a str>,
    on_path: IndexSet<&'a str>,
    reported: HashSet<Vec<String>>,
}

/// Rotate a closed cycle (`[B, C, A, B]`) so it starts and ends at its
/// smallest name (`[A, B, C, A]`).
pub(crate) fn normalize_cycle(cycle: &[String]) -> Vec<String> {
    let Some((_, ring)) = cycle.split_last() else {
        return vec![];
    };
    let Some(smallest) = ring.iter()
        .enumerate()
        .min_by_key(|(_, name)| *name)
        .map(|(idx, _)| idx) else {
        // A single-element "cycle" has nothing to rotate.
        return cycle.to_vec();
    };

    let mut normalized = ring.to_vec();
    normalized.rotate_left(smallest);
    normalized.push(ring[smallest].clone());
    normalized
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegistryIntegrityError {
    #[error("Fragment cycle detected: {}", .cycle_path.join(" → "))]
    FragmentCycleDetected {
        cycle_path: Vec<String>,
    },

    #[error("Fragment '{fragment_name}' references undefined fragment '{undefined_fragment}'")]
    UndefinedFragmentReference {
        fragment_name: String,
        fragment_location: loc::SourceLocation,
        undefined_fragment: String,
    },
}
