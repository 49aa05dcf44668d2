use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use schema::{Schema, SchemaError, SchemaStore};

use crate::tests::ide::completion_dsl::{FixtureProject, STYLE_PATH, schema};
use crate::{AlloyProject, CompletionEngine, CompletionRequest, Position, TextDocument};

fn labels(engine: &CompletionEngine, text: &str, path: &Path, position: Position) -> Vec<String> {
    let document = TextDocument::new(text);
    let request = CompletionRequest::new(&document, path, position);
    engine
        .complete(&request)
        .unwrap()
        .into_iter()
        .map(|c| c.label)
        .collect()
}

#[test]
fn repeated_requests_give_identical_results() {
    let store = Arc::new(SchemaStore::preloaded(schema().demo().build()));
    let engine = CompletionEngine::new(store, FixtureProject::default());
    let document = TextDocument::new("\"Label\": {\n  fo\n}");
    let request = CompletionRequest::new(&document, Path::new(STYLE_PATH), Position::new(1, 4));

    let first = engine.complete(&request).unwrap();
    let second = engine.complete(&request).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn schema_load_failure_is_reported_then_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let store = Arc::new(SchemaStore::new(move || -> Result<Schema, SchemaError> {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(SchemaError::Source("not yet".to_string()));
        }
        Ok(schema().demo().build())
    }));
    let engine = CompletionEngine::new(store, FixtureProject::default());
    let document = TextDocument::new("color: ");
    let request = CompletionRequest::new(&document, Path::new(STYLE_PATH), Position::new(0, 7));

    let err = engine.complete(&request).unwrap_err();
    assert!(matches!(err, SchemaError::Source(_)));

    let items = engine.complete(&request).unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_first_requests_load_schema_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let store = Arc::new(SchemaStore::new(move || -> Result<Schema, SchemaError> {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Ok(schema().demo().build())
    }));
    let engine = CompletionEngine::new(Arc::clone(&store), FixtureProject::default());

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let got = labels(&engine, "\"Win", Path::new(STYLE_PATH), Position::new(0, 4));
                assert_eq!(got, ["Window"]);
            });
        }
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(store.is_loaded());
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompletionEngine>();
}

#[test]
fn closure_project_lookup_supplies_companion_markup() {
    let dir = tempfile::tempdir().unwrap();
    let markup = dir.path().join("index.xml");
    fs::write(&markup, r#"<Label class="title" />"#).unwrap();

    let store = Arc::new(SchemaStore::preloaded(schema().demo().build()));
    let engine = CompletionEngine::new(store, move |_: &Path| -> Option<PathBuf> {
        Some(markup.clone())
    });
    assert_eq!(
        labels(&engine, "\".", Path::new("index.tss"), Position::new(0, 2)),
        ["title"]
    );
}

#[test]
fn alloy_project_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for sub in ["app/styles", "app/views", "app/i18n/en", "app/assets/images"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(
        root.join("app/views/index.xml"),
        r#"<Alloy><Window id="main"><Label class="title big" textid="hello"/></Window></Alloy>"#,
    )
    .unwrap();
    fs::write(
        root.join("app/i18n/en/strings.xml"),
        r#"<resources><string name="hello">Hello</string></resources>"#,
    )
    .unwrap();
    fs::write(root.join("app/assets/images/logo@2x.png"), b"").unwrap();

    let style = root.join("app/styles/index.tss");
    let store = Arc::new(SchemaStore::preloaded(schema().demo().build()));
    let engine = CompletionEngine::new(store, AlloyProject::new(root));

    assert_eq!(labels(&engine, "\".", &style, Position::new(0, 2)), ["title", "big"]);
    assert_eq!(labels(&engine, "'#", &style, Position::new(0, 2)), ["main"]);
    assert_eq!(
        labels(&engine, "  textid: \"", &style, Position::new(0, 11)),
        ["hello"]
    );
    assert_eq!(
        labels(&engine, "  image: \"", &style, Position::new(0, 10)),
        ["/images/logo.png"]
    );
}
