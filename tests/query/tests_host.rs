//! The build-once grammar host under concurrent first use.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ludeme::schema::{ClassDescriptor, SchemaError};
use ludeme::{GrammarError, GrammarHost, Schema, TypeProvider};

use crate::helpers::schema_fixtures::fixture_schema;

/// Serves the fixture schema, counting calls; optionally fails the first one.
struct CountingProvider {
    schema: Schema,
    calls: AtomicUsize,
    fail_first: bool,
}

impl CountingProvider {
    fn new(fail_first: bool) -> Self {
        Self {
            schema: fixture_schema(),
            calls: AtomicUsize::new(0),
            fail_first,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TypeProvider for CountingProvider {
    fn list_classes(&self, namespace_root: &str) -> Result<Vec<ClassDescriptor>, SchemaError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_first && n == 0 {
            return Err(SchemaError::invalid(namespace_root, "provider unavailable"));
        }
        self.schema.list_classes(namespace_root)
    }
}

#[test]
fn test_grammar_derived_lazily() {
    let host = GrammarHost::new(CountingProvider::new(false));
    assert!(!host.is_derived());
    assert!(host.get().is_none());
    assert_eq!(host.provider().calls(), 0);

    let grammar = host.grammar().unwrap();
    assert!(host.is_derived());
    assert!(Arc::ptr_eq(&grammar, &host.get().unwrap()));
}

#[test]
fn test_concurrent_first_callers_share_one_derivation() {
    let host = GrammarHost::new(CountingProvider::new(false));
    let grammars: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| host.grammar().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for grammar in &grammars[1..] {
        assert!(Arc::ptr_eq(&grammars[0], grammar));
    }
    // One derivation reads the game and metadata namespaces once each.
    assert_eq!(host.provider().calls(), 2);
}

#[test]
fn test_failed_derivation_is_retried() {
    let host = GrammarHost::new(CountingProvider::new(true));
    let err = host.grammar().unwrap_err();
    assert!(matches!(err, GrammarError::Schema(SchemaError::Invalid { .. })));
    assert!(!host.is_derived());

    let grammar = host.grammar().unwrap();
    assert!(host.is_derived());
    assert!(grammar.game_root().is_some());
}

#[test]
fn test_host_export_derives_on_demand() {
    let host = GrammarHost::new(fixture_schema());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.txt");
    host.export(&path).unwrap();

    assert!(host.is_derived());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, host.grammar().unwrap().to_text());
}
