use crate::FieldSelection;
use crate::FragmentRegistry;
use crate::QueryComposer;
use crate::RootQuery;
use crate::SelectionSet;
use crate::ShapeValidator;
use crate::ValidationError;
use crate::tests::test_utils::TICKS_FRAGMENT;
use crate::tests::test_utils::schedule_ticks_registry;
use crate::tests::test_utils::without_key;
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;

const FRAGMENT_COUNT: usize = 6;

fn fragment_name(idx: usize) -> String {
    format!("Frag{idx}")
}

/// `Frag{i}` spreads `Frag{j}` wherever `adjacency[i][j]` is set. Spreads may
/// form cycles.
fn registry_from_adjacency(adjacency: &[Vec<bool>]) -> FragmentRegistry {
    let mut registry = FragmentRegistry::new();
    for (idx, row) in adjacency.iter().enumerate() {
        let nested_refs = row.iter()
            .enumerate()
            .filter(|(_, spreads)| **spreads)
            .map(|(target, _)| fragment_name(target))
            .collect();
        registry.register(
            fragment_name(idx),
            "Node",
            vec![FieldSelection::new(format!("field{idx}"))],
            nested_refs,
        ).unwrap();
    }
    registry
}

fn reachable(adjacency: &[Vec<bool>], roots: &[usize]) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut stack = roots.to_vec();
    while let Some(idx) = stack.pop() {
        if !seen.insert(idx) {
            continue;
        }
        stack.extend(
            adjacency[idx].iter()
                .enumerate()
                .filter(|(_, spreads)| **spreads)
                .map(|(target, _)| target),
        );
    }
    seen.into_iter().map(fragment_name).collect()
}

fn arb_adjacency() -> impl Strategy<Value = Vec<Vec<bool>>> {
    prop::collection::vec(
        prop::collection::vec(prop::bool::weighted(0.3), FRAGMENT_COUNT),
        FRAGMENT_COUNT,
    )
}

fn arb_roots() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..FRAGMENT_COUNT, 0..4)
}

fn arb_status() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("DECLARED_IN_CODE"),
        Just("RUNNING"),
        Just("STOPPED"),
    ]
}

fn arb_ticks_payload() -> impl Strategy<Value = serde_json::Value> {
    (
        "[0-9]{1,6}",
        prop::option::of("[A-Za-z]{1,8}/[A-Za-z_]{1,12}"),
        "[0-9]{1,6}",
        arb_status(),
        prop::collection::vec(0u32..2_000_000_000, 1..6),
    ).prop_map(|(id, timezone, state_id, status, timestamps)| json!({
        "id": id,
        "executionTimezone": timezone,
        "scheduleState": {"id": state_id, "status": status},
        "futureTicks": {
            "results": timestamps.into_iter()
                .map(|timestamp| json!({"timestamp": timestamp}))
                .collect::<Vec<_>>(),
        },
    }))
}

fn arb_required_key() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("", "id")),
        Just(("", "scheduleState")),
        Just(("", "futureTicks")),
        Just(("/scheduleState", "id")),
        Just(("/scheduleState", "status")),
        Just(("/futureTicks", "results")),
        Just(("/futureTicks/results/0", "timestamp")),
    ]
}

proptest! {
    #[test]
    fn compose_emits_each_reachable_fragment_once(
        adjacency in arb_adjacency(),
        roots in arb_roots(),
    ) {
        let registry = registry_from_adjacency(&adjacency);
        let composer = QueryComposer::new(&registry);
        let root = RootQuery::from(roots.iter().fold(
            SelectionSet::new(vec![FieldSelection::new("node")]),
            |root, idx| root.with_fragment_ref(fragment_name(*idx)),
        ));

        let composed = composer.compose(&root, &[]).unwrap();
        let names = composed.fragment_names();
        let unique: HashSet<String> = names.iter().map(|name| name.to_string()).collect();

        prop_assert_eq!(unique.len(), names.len());
        prop_assert_eq!(unique, reachable(&adjacency, &roots));
    }

    #[test]
    fn compose_is_idempotent(
        adjacency in arb_adjacency(),
        roots in arb_roots(),
        add_typename in any::<bool>(),
    ) {
        let registry = registry_from_adjacency(&adjacency);
        let composer = QueryComposer::with_options(&registry, crate::ComposeOptions {
            add_typename,
            operation_name: Some("Nodes".to_string()),
        });
        let root_names: Vec<String> = roots.iter().copied().map(fragment_name).collect();
        let root_names: Vec<&str> = root_names.iter().map(String::as_str).collect();

        let root = RootQuery::from(SelectionSet::new(vec![FieldSelection::new("node")]));

        let first = composer.compose(&root, &root_names).unwrap();
        let second = composer.compose(&root, &root_names).unwrap();
        prop_assert_eq!(first.to_document_string(), second.to_document_string());
    }

    #[test]
    fn conforming_tick_payloads_validate(payload in arb_ticks_payload()) {
        let registry = schedule_ticks_registry();
        let validator = ShapeValidator::new(&registry);

        prop_assert_eq!(validator.validate(TICKS_FRAGMENT, &payload), Ok(()));
    }

    #[test]
    fn removing_a_required_key_is_a_missing_field(
        payload in arb_ticks_payload(),
        (pointer, key) in arb_required_key(),
    ) {
        let registry = schedule_ticks_registry();
        let validator = ShapeValidator::new(&registry);
        let payload = without_key(payload, pointer, key);

        let err = validator.validate(TICKS_FRAGMENT, &payload).unwrap_err();
        prop_assert!(
            matches!(&err, ValidationError::MissingField { field, .. } if field == key),
            "unexpected error: {err}",
        );
    }
}
