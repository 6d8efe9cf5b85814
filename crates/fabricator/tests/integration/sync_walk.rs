//! Integration tests for the blocking walk.

use std::sync::Arc;

use fabricator::{Constructor, Error, Fabricator, LoadErrorPolicy, Options, Stack};

use crate::common::{names, Fixtures, ScriptResolver};

fn fabricator() -> Fabricator<ScriptResolver> {
    Fabricator::new(ScriptResolver::new())
}

#[test]
fn test_always_returns_a_list() {
    let fx = Fixtures::new();
    let stack = Stack::sequence([
        Stack::realized(Constructor::named("Test")),
        Stack::location(fx.directory()),
    ]);

    let entities = fabricator().fabricate(&stack).expect("walk should succeed");
    assert_eq!(entities.len(), 3);
    assert_eq!(names(&entities), vec!["test", "index", "other"]);
}

#[test]
fn test_single_script_path() {
    let fx = Fixtures::new();
    let entities = fabricator()
        .fabricate(&Stack::location(fx.string()))
        .unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].name(), Some("constructor"));
    assert_eq!(entities[0].origin().path(), Some(fx.string().as_path()));
}

#[test]
fn test_directory_ignores_other_files_and_subdirectories() {
    let fx = Fixtures::new();
    let entities = fabricator()
        .fabricate(&Stack::location(fx.directory()))
        .unwrap();

    assert_eq!(entities.len(), 2);
    assert_eq!(names(&entities), vec!["index", "other"]);
}

#[test]
fn test_relative_location_resolves_against_source() {
    let fx = Fixtures::new();
    let fabricator = fabricator().with_options(Options::new().with_source(fx.root()));

    let entities = fabricator.fabricate(&Stack::location("sub")).unwrap();
    assert_eq!(entities.len(), 2);
    assert!(entities
        .iter()
        .all(|e| e.origin().path().unwrap().starts_with(fx.root())));
}

#[test]
fn test_recursion_can_be_disabled() {
    let fx = Fixtures::new();
    let fabricator = fabricator().with_options(Options::new().with_recursive(false));

    let entities = fabricator
        .fabricate(&Stack::location(fx.directory()))
        .unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].value().as_ref(), &Constructor::named("Index"));
    assert_eq!(entities[0].name(), Some("sub"));
}

#[test]
fn test_mapping() {
    let fx = Fixtures::new();
    let stack = Stack::mapping([
        ("Status", Stack::realized(Constructor::named("Status"))),
        ("another", Stack::realized(Constructor::named("Another"))),
        ("latest", Stack::location(fx.string())),
    ]);

    let entities = fabricator().fabricate(&stack).unwrap();
    assert_eq!(entities.len(), 3);
    assert_eq!(names(&entities), vec!["status", "another", "latest"]);
}

#[test]
fn test_mapping_key_used_when_declared_name_empty() {
    let stack = Stack::mapping([(
        "Status",
        Stack::realized(Constructor::anonymous().with_declared_name("")),
    )]);

    let entities = fabricator().fabricate(&stack).unwrap();
    assert_eq!(entities[0].name(), Some("status"));
}

#[test]
fn test_declared_name_is_kept() {
    let stack = Stack::mapping([(
        "status",
        Stack::realized(Constructor::anonymous().with_declared_name("Health")),
    )]);

    let entities = fabricator().fabricate(&stack).unwrap();
    assert_eq!(entities[0].name(), Some("health"));
}

#[test]
fn test_nested_sequences_in_mapping() {
    let fx = Fixtures::new();
    let stack = Stack::mapping([
        (
            "placeholder",
            Stack::sequence([
                Stack::realized(Constructor::named("Foo")),
                Stack::realized(Constructor::named("Bar")),
            ]),
        ),
        (
            "another",
            Stack::sequence([
                Stack::location(fx.string()),
                Stack::realized(Constructor::named("Baz")),
            ]),
        ),
        ("last", Stack::sequence([Stack::realized(Constructor::named("Last"))])),
        ("latest", Stack::location(fx.string())),
    ]);

    let entities = fabricator().fabricate(&stack).unwrap();
    assert_eq!(
        names(&entities),
        vec!["foo", "bar", "constructor", "baz", "last", "latest"]
    );
}

#[test]
fn test_mapping_value_directory_uses_file_stems() {
    let fx = Fixtures::new();
    let stack = Stack::mapping([("plugins", Stack::location(fx.directory()))]);

    let entities = fabricator().fabricate(&stack).unwrap();
    assert_eq!(names(&entities), vec!["index", "other"]);
}

#[test]
fn test_non_constructible_values_are_filtered() {
    let fx = Fixtures::new();
    let entities = fabricator()
        .fabricate(&Stack::location(fx.join("values")))
        .unwrap();
    assert_eq!(names(&entities), vec!["thing"]);
}

#[test]
fn test_empty_directory() {
    let fx = Fixtures::new();
    let entities = fabricator()
        .fabricate(&Stack::location(fx.join("empty")))
        .unwrap();
    assert!(entities.is_empty());
}

#[test]
fn test_missing_directory_is_listing_error() {
    let fx = Fixtures::new();
    let err = fabricator()
        .fabricate(&Stack::location(fx.join("missing")))
        .unwrap_err();
    assert!(matches!(err, Error::ReadDir { .. }));
}

#[test]
fn test_broken_script_fails_fast_with_location() {
    let fx = Fixtures::new();
    let err = fabricator()
        .fabricate(&Stack::location(fx.join("broken")))
        .unwrap_err();

    let Error::Load { location, message } = err else {
        panic!("expected load error");
    };
    assert!(location.ends_with("broken/b.js"));
    assert_eq!(message, "unexpected token");
}

#[test]
fn test_broken_script_skipped_by_policy() {
    let fx = Fixtures::new();
    let fabricator = fabricator()
        .with_options(Options::new().with_load_error_policy(LoadErrorPolicy::Skip));

    let entities = fabricator
        .fabricate(&Stack::location(fx.join("broken")))
        .unwrap();
    assert_eq!(names(&entities), vec!["a"]);
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let fx = Fixtures::new();
    let fabricator = fabricator();
    let stack = Stack::sequence([Stack::location(fx.string()), Stack::location(fx.directory())]);

    let first = fabricator.fabricate(&stack).unwrap();
    let reads_after_first = fabricator.resolver().reads();
    let second = fabricator.fabricate(&stack).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(names(&first), names(&second));
    assert!(first
        .iter()
        .zip(&second)
        .all(|(a, b)| Arc::ptr_eq(a.value(), b.value())));
    // Second walk is served from the resolver's cache.
    assert_eq!(fabricator.resolver().reads(), reads_after_first);
}

#[test]
fn test_options_loaded_from_toml() {
    let fx = Fixtures::new();
    let options = Options::from_toml_str(&format!(
        "source = {:?}\nrecursive = false\n",
        fx.root().display().to_string()
    ))
    .unwrap();

    let entities = fabricator()
        .with_options(options)
        .fabricate(&Stack::location("sub"))
        .unwrap();
    assert_eq!(entities.len(), 1);
}
