use crate::ComposeError;
use crate::ComposeOptions;
use crate::FieldSelection;
use crate::FragmentRegistry;
use crate::QueryComposer;
use crate::RootQuery;
use crate::SelectionSet;
use crate::TypeAnnotation;
use crate::VariableDefinition;
use crate::dashboard;
use crate::tests::test_utils::registry_from_str;
use serde_json::json;

fn root(source: &str) -> RootQuery {
    RootQuery::parse(source).unwrap()
}

const TICKS_WITH_LIMIT: &str = "fragment TickFields on Schedule { \
    futureTicks(limit: $limit) { results { timestamp } } }";

#[test]
fn renders_root_and_fragments() {
    let registry = registry_from_str("fragment UserFields on User { id name }");
    let composer = QueryComposer::with_options(&registry, ComposeOptions {
        operation_name: Some("Viewer".to_string()),
        ..ComposeOptions::default()
    });

    let composed = composer.compose(&root("{ viewer { ...UserFields } }"), &[]).unwrap();

    assert_eq!(
        composed.to_document_string(),
        concat!(
            "query Viewer {\n",
            "  viewer {\n",
            "    ...UserFields\n",
            "  }\n",
            "}\n",
            "\n",
            "fragment UserFields on User {\n",
            "  id\n",
            "  name\n",
            "}\n",
        ),
    );
    assert_eq!(composed.to_string(), composed.to_document_string());
}

#[test]
fn includes_transitive_fragments_once() {
    let registry = registry_from_str(
        r#"
        fragment FragA on Node { id ...FragB ...FragC }
        fragment FragB on Node { b ...FragD }
        fragment FragC on Node { c ...FragD }
        fragment FragD on Node { d }
        "#,
    );
    let composer = QueryComposer::new(&registry);

    let composed = composer.compose(&root("{ node { ...FragA ...FragD } }"), &["FragC"]).unwrap();

    assert_eq!(composed.fragment_names(), vec!["FragA", "FragB", "FragD", "FragC"]);
    assert_eq!(composed.to_document_string().matches("fragment FragD on").count(), 1);
}

#[test]
fn root_fields_are_walked_before_root_spreads_then_named_fragments() {
    let registry = registry_from_str(
        r#"
        fragment X on T { x }
        fragment Y on T { y }
        fragment Z on T { z }
        "#,
    );
    let composer = QueryComposer::new(&registry);

    let composed = composer.compose(&root("{ ...Y a { ...X } }"), &["Z", "X"]).unwrap();
    assert_eq!(composed.fragment_names(), vec!["X", "Y", "Z"]);
}

#[test]
fn composition_is_deterministic() {
    let mut registry = FragmentRegistry::new();
    dashboard::register_dashboard_fragments(&mut registry).unwrap();
    let composer = QueryComposer::with_options(&registry, ComposeOptions {
        add_typename: true,
        operation_name: Some("AssetTableQuery".to_string()),
    });
    let root_selections = root("{ assetNodes { ...AssetTableDefinitionFragment } assets { ...AssetTableFragment } }");

    let first = composer.compose(&root_selections, &[]).unwrap().to_document_string();
    let second = composer.compose(&root_selections, &[]).unwrap().to_document_string();
    assert_eq!(first, second);
}

#[test]
fn unregistered_root_spread_fails() {
    let registry = FragmentRegistry::new();
    let composer = QueryComposer::new(&registry);

    assert_eq!(
        composer.compose(&root("{ viewer { ...Missing } }"), &[]).unwrap_err(),
        ComposeError::NotFound {
            fragment_name: "Missing".to_string(),
            referenced_from: None,
        },
    );
}

#[test]
fn unregistered_transitive_spread_names_its_parent() {
    let registry = registry_from_str("fragment AssetTableFragment on Asset { id definition { ...AssetTableDefinitionFragment } }");
    let composer = QueryComposer::new(&registry);

    let err = composer.compose(&root("{ assets { id } }"), &["AssetTableFragment"]).unwrap_err();
    assert_eq!(
        err,
        ComposeError::NotFound {
            fragment_name: "AssetTableDefinitionFragment".to_string(),
            referenced_from: Some("AssetTableFragment".to_string()),
        },
    );
    assert_eq!(
        err.to_string(),
        "No fragment named 'AssetTableDefinitionFragment' is registered \
        (spread in fragment 'AssetTableFragment')",
    );
}

#[test]
fn unregistered_named_fragment_fails() {
    let registry = FragmentRegistry::new();
    let composer = QueryComposer::new(&registry);

    assert!(matches!(
        composer.compose(&root("{ viewer { id } }"), &["Nope"]),
        Err(ComposeError::NotFound { fragment_name, .. }) if fragment_name == "Nope",
    ));
}

#[test]
fn spread_cycles_terminate() {
    let registry = registry_from_str(
        r#"
        fragment FragA on User { id ...FragB }
        fragment FragB on User { name ...FragA }
        "#,
    );
    let composer = QueryComposer::new(&registry);

    let composed = composer.compose(&root("{ viewer { ...FragA } }"), &[]).unwrap();
    assert_eq!(composed.fragment_names(), vec!["FragA", "FragB"]);
}

#[test]
fn add_typename_fills_nested_selection_sets() {
    let registry = registry_from_str(
        r#"
        fragment TickFields on FutureInstigationTick { timestamp }
        fragment StateFields on InstigationState { __typename id status }
        "#,
    );
    let composer = QueryComposer::with_options(&registry, ComposeOptions {
        add_typename: true,
        ..ComposeOptions::default()
    });

    let composed = composer.compose(
        &root("{ schedule { scheduleState { ...StateFields } futureTicks { results { ...TickFields } } } }"),
        &[],
    ).unwrap();

    assert_eq!(
        composed.to_document_string(),
        concat!(
            "query {\n",
            "  schedule {\n",
            "    scheduleState {\n",
            "      ...StateFields\n",
            "      __typename\n",
            "    }\n",
            "    futureTicks {\n",
            "      results {\n",
            "        ...TickFields\n",
            "        __typename\n",
            "      }\n",
            "      __typename\n",
            "    }\n",
            "    __typename\n",
            "  }\n",
            "}\n",
            "\n",
            "fragment StateFields on InstigationState {\n",
            "  __typename\n",
            "  id\n",
            "  status\n",
            "}\n",
            "\n",
            "fragment TickFields on FutureInstigationTick {\n",
            "  timestamp\n",
            "  __typename\n",
            "}\n",
        ),
    );
}

#[test]
fn renders_aliases_arguments_and_directives() {
    let registry = registry_from_str(
        r#"fragment ScheduleFields on Schedule {
            ticks: futureTicks(limit: 3, cursor: "a\"b") @include(if: $withTicks) {
                results { timestamp }
            }
            executionTimezone @nullable
        }"#,
    );
    let composer = QueryComposer::new(&registry);

    let document = composer
        .compose(
            &root("query ($withTicks: Boolean!) { schedule { ...ScheduleFields } }"),
            &[],
        )
        .unwrap()
        .to_document_string();

    assert!(document.contains(
        "  ticks: futureTicks(limit: 3, cursor: \"a\\\"b\") @include(if: $withTicks) {\n",
    ));
    assert!(document.contains("  executionTimezone\n"));
    assert!(!document.contains("@nullable"));
}

#[test]
fn renders_fields_built_in_code() {
    let mut registry = FragmentRegistry::new();
    registry.register(
        "TickFields",
        "FutureInstigationTick",
        vec![FieldSelection::new("timestamp")],
        vec![],
    ).unwrap();
    let composer = QueryComposer::new(&registry);
    let root_selections = SelectionSet::new(vec![
        FieldSelection::new("futureTicks")
            .with_argument("limit", crate::ArgValue::Int(5))
            .with_selection_set(SelectionSet::default().with_fragment_ref("TickFields")),
    ]);

    let document = composer
        .compose(&RootQuery::from(root_selections), &[])
        .unwrap()
        .to_document_string();
    assert!(document.starts_with("query {\n  futureTicks(limit: 5) {\n    ...TickFields\n  }\n}\n"));
}

#[test]
fn request_body_for_transport() {
    let registry = registry_from_str("fragment UserFields on User { id }");
    let composer = QueryComposer::with_options(&registry, ComposeOptions {
        operation_name: Some("Viewer".to_string()),
        ..ComposeOptions::default()
    });
    let composed = composer.compose(&root("{ viewer { ...UserFields } }"), &[]).unwrap();

    let request = composed.to_request(serde_json::Map::new());
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "operationName": "Viewer",
            "query": composed.to_document_string(),
        }),
    );

    let mut variables = serde_json::Map::new();
    variables.insert("limit".to_string(), json!(3));
    let anonymous = QueryComposer::new(&registry)
        .compose(&root("query ($limit: Int) { viewer { ...UserFields friends(first: $limit) { id } } }"), &[])
        .unwrap()
        .to_request(variables);
    assert_eq!(
        serde_json::to_value(&anonymous).unwrap(),
        json!({
            "query": anonymous.query,
            "variables": {"limit": 3},
        }),
    );
}

#[test]
fn root_query_name_and_variables_are_rendered() {
    let registry = registry_from_str(TICKS_WITH_LIMIT);
    let composer = QueryComposer::new(&registry);

    let composed = composer.compose(
        &root("query Ticks($limit: Int!) { schedule { ...TickFields } }"),
        &[],
    ).unwrap();

    assert_eq!(composed.operation_name(), Some("Ticks"));
    assert_eq!(
        composed.to_document_string(),
        concat!(
            "query Ticks($limit: Int!) {\n",
            "  schedule {\n",
            "    ...TickFields\n",
            "  }\n",
            "}\n",
            "\n",
            "fragment TickFields on Schedule {\n",
            "  futureTicks(limit: $limit) {\n",
            "    results {\n",
            "      timestamp\n",
            "    }\n",
            "  }\n",
            "}\n",
        ),
    );
    assert_eq!(composed.to_request(serde_json::Map::new()).operation_name.as_deref(), Some("Ticks"));
}

#[test]
fn anonymous_root_keeps_defaults_and_list_types() {
    let registry = registry_from_str(TICKS_WITH_LIMIT);
    let composer = QueryComposer::new(&registry);

    let composed = composer.compose(
        &root("query ($limit: Int = 10, $ids: [ID!]!) { schedules(ids: $ids) { ...TickFields } }"),
        &[],
    ).unwrap();

    assert_eq!(composed.operation_name(), None);
    assert!(composed.to_document_string().starts_with(
        "query ($limit: Int = 10, $ids: [ID!]!) {\n  schedules(ids: $ids) {\n",
    ));
}

#[test]
fn operation_name_option_overrides_root_name() {
    let registry = registry_from_str(TICKS_WITH_LIMIT);
    let composer = QueryComposer::with_options(&registry, ComposeOptions {
        operation_name: Some("FutureTicks".to_string()),
        ..ComposeOptions::default()
    });

    let composed = composer.compose(
        &root("query Ticks($limit: Int!) { schedule { ...TickFields } }"),
        &[],
    ).unwrap();

    assert_eq!(composed.operation_name(), Some("FutureTicks"));
    assert!(composed.to_document_string().starts_with("query FutureTicks($limit: Int!) {\n"));
}

#[test]
fn variables_built_in_code_are_rendered() {
    let registry = registry_from_str(TICKS_WITH_LIMIT);
    let composer = QueryComposer::new(&registry);
    let root_query = RootQuery::new(SelectionSet::new(vec![
        FieldSelection::new("schedule")
            .with_selection_set(SelectionSet::default().with_fragment_ref("TickFields")),
    ]))
        .with_name("Ticks")
        .with_variable(
            VariableDefinition::new("limit", TypeAnnotation::named("Int").non_null())
                .with_default(crate::ArgValue::Int(5)),
        );

    let document = composer.compose(&root_query, &[]).unwrap().to_document_string();
    assert!(document.starts_with("query Ticks($limit: Int! = 5) {\n"));
}

#[test]
fn variable_used_by_fragment_must_be_declared() {
    let registry = registry_from_str(TICKS_WITH_LIMIT);
    let composer = QueryComposer::new(&registry);

    let err = composer.compose(&root("{ schedule { ...TickFields } }"), &[]).unwrap_err();
    assert_eq!(
        err,
        ComposeError::UndeclaredVariable {
            used_in: Some("TickFields".to_string()),
            variable: "limit".to_string(),
        },
    );
    assert_eq!(
        err.to_string(),
        "Variable `$limit` is used in fragment 'TickFields' but not declared by the root query",
    );
}

#[test]
fn variable_used_by_root_directive_must_be_declared() {
    let registry = FragmentRegistry::new();
    let composer = QueryComposer::new(&registry);

    assert_eq!(
        composer.compose(&root("{ viewer @skip(if: $anonymous) { id } }"), &[]).unwrap_err(),
        ComposeError::UndeclaredVariable {
            used_in: None,
            variable: "anonymous".to_string(),
        },
    );
    assert!(composer.compose(
        &root("query ($anonymous: Boolean!) { viewer @skip(if: $anonymous) { id } }"),
        &[],
    ).is_ok());
}

#[test]
fn declared_variable_must_be_used() {
    let registry = registry_from_str(TICKS_WITH_LIMIT);
    let composer = QueryComposer::new(&registry);

    let err = composer.compose(
        &root("query ($limit: Int!, $cursor: String) { schedule { ...TickFields } }"),
        &[],
    ).unwrap_err();
    assert_eq!(err, ComposeError::UnusedVariable { variable: "cursor".to_string() });
    assert_eq!(
        err.to_string(),
        "Variable `$cursor` is declared by the root query but never used",
    );
}

#[test]
fn empty_root_selection_is_rejected() {
    let registry = registry_from_str("fragment UserFields on User { id }");
    let composer = QueryComposer::new(&registry);

    let err = composer.compose(&RootQuery::default(), &["UserFields"]).unwrap_err();
    assert_eq!(
        err,
        ComposeError::EmptySelectionSet {
            field: None,
            fragment_name: None,
        },
    );
    assert_eq!(err.to_string(), "Empty selection set in the root selection");
}

#[test]
fn empty_field_selection_is_rejected() {
    let registry = FragmentRegistry::new();
    let composer = QueryComposer::new(&registry);
    let root_query = RootQuery::from(SelectionSet::new(vec![
        FieldSelection::new("viewer").with_fields(vec![]),
    ]));

    let err = composer.compose(&root_query, &[]).unwrap_err();
    assert_eq!(
        err,
        ComposeError::EmptySelectionSet {
            field: Some("viewer".to_string()),
            fragment_name: None,
        },
    );
    assert_eq!(err.to_string(), "Empty selection set on field `viewer` in the root selection");
}

#[test]
fn empty_selections_inside_fragments_are_rejected() {
    let mut registry = FragmentRegistry::new();
    registry.register(
        "UserFields",
        "User",
        vec![FieldSelection::new("id"), FieldSelection::new("friends").with_fields(vec![])],
        vec![],
    ).unwrap();
    registry.register("EmptyFields", "User", vec![], vec![]).unwrap();
    let composer = QueryComposer::new(&registry);

    assert_eq!(
        composer.compose(&root("{ viewer { ...UserFields } }"), &[]).unwrap_err(),
        ComposeError::EmptySelectionSet {
            field: Some("friends".to_string()),
            fragment_name: Some("UserFields".to_string()),
        },
    );

    let err = composer.compose(&root("{ viewer { ...EmptyFields } }"), &[]).unwrap_err();
    assert_eq!(
        err,
        ComposeError::EmptySelectionSet {
            field: None,
            fragment_name: Some("EmptyFields".to_string()),
        },
    );
    assert_eq!(err.to_string(), "Empty selection set in fragment 'EmptyFields'");
}
