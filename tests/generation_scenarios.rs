//! End-to-end generation scenarios
//!
//! Drives the generator directly with a scripted model, a manual clock and
//! both store backends.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use diagram_gen::{
    cache::{ExpiringCache, FileStore, KeyValueStore, ManualClock, MemoryStore, DEFAULT_TTL},
    error::{GenerationError, ModelError},
    model::LanguageModel,
    pipeline::{cache_key, SanitizePolicy},
    DiagramType, Generator,
};

const START_MS: u64 = 1_700_000_000_000;

// == Helpers ==

/// Replays queued answers in order and records every prompt it receives.
#[derive(Default)]
struct ScriptedModel {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn answering(answers: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ModelError::EmptyResponse)
    }
}

fn generator_over(
    model: Arc<ScriptedModel>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<ManualClock>,
) -> Generator {
    let cache = Arc::new(ExpiringCache::with_clock(store, DEFAULT_TTL, clock));
    Generator::new(model, cache)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "diagram_gen_scenario_{}_{}.json",
        name,
        std::process::id()
    ))
}

// == Scenarios ==

#[tokio::test]
async fn test_fenced_flowchart_is_cleaned_and_cached() {
    let model = ScriptedModel::answering(&[
        "```mermaid\nflowchart TD\n    A[Start] --> B[Enter credentials]\n    B --> C{Valid?}\n```",
    ]);
    let clock = Arc::new(ManualClock::new(START_MS));
    let generator = generator_over(model.clone(), Arc::new(MemoryStore::new()), clock);

    let code = generator
        .generate("Show login process", DiagramType::Flowchart)
        .await
        .unwrap();

    assert_eq!(
        code,
        "flowchart TD\n    A[Start] --> B[Enter credentials]\n    B --> C{Valid?}"
    );

    let prompt = model.last_prompt().unwrap();
    assert!(prompt.contains("Start with 'flowchart TD'"));
    assert!(prompt.ends_with("User request: Show login process"));

    let cached = generator
        .cache()
        .get(&cache_key(DiagramType::Flowchart, "Show login process"))
        .await;
    assert_eq!(cached.as_deref(), Some(code.as_str()));
}

#[tokio::test]
async fn test_graph_keyword_fails_flowchart_validation() {
    let model = ScriptedModel::answering(&["graph TD\n  A --> B", "flowchart LR\n  A --> B"]);
    let clock = Arc::new(ManualClock::new(START_MS));
    let generator = generator_over(model.clone(), Arc::new(MemoryStore::new()), clock);

    let err = generator
        .generate("Show login process", DiagramType::Flowchart)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Validation { .. }));
    assert_eq!(err.diagram_type(), DiagramType::Flowchart);

    // Nothing was cached, so the retry reaches the model again.
    let code = generator
        .generate("Show login process", DiagramType::Flowchart)
        .await
        .unwrap();
    assert_eq!(code, "flowchart LR\n  A --> B");
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_repeat_within_ttl_skips_model() {
    let model = ScriptedModel::answering(&["sequenceDiagram\n  Alice->>Bob: Hello"]);
    let clock = Arc::new(ManualClock::new(START_MS));
    let generator = generator_over(model.clone(), Arc::new(MemoryStore::new()), clock.clone());

    let first = generator
        .generate("Greeting", DiagramType::Sequence)
        .await
        .unwrap();

    clock.advance(Duration::from_secs(23 * 60 * 60));

    let second = generator
        .generate("Greeting", DiagramType::Sequence)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(model.calls(), 1);

    let stats = generator.cache().stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_repeat_after_ttl_regenerates() {
    let model = ScriptedModel::answering(&[
        "erDiagram\n  USER ||--o{ ORDER : places",
        "erDiagram\n  CUSTOMER ||--o{ ORDER : places",
    ]);
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let generator = generator_over(model.clone(), store.clone(), clock.clone());

    generator
        .generate("Shop schema", DiagramType::EntityRelationship)
        .await
        .unwrap();

    clock.advance(DEFAULT_TTL + Duration::from_millis(1));

    let refreshed = generator
        .generate("Shop schema", DiagramType::EntityRelationship)
        .await
        .unwrap();

    assert_eq!(refreshed, "erDiagram\n  CUSTOMER ||--o{ ORDER : places");
    assert_eq!(model.calls(), 2);
    assert_eq!(store.len().await, 1);
    assert_eq!(generator.cache().stats().await.expired, 1);
}

#[tokio::test]
async fn test_same_description_different_types_are_separate() {
    let model = ScriptedModel::answering(&["flowchart TD\n  A --> B", "stateDiagram-v2\n  [*] --> Idle"]);
    let clock = Arc::new(ManualClock::new(START_MS));
    let generator = generator_over(model.clone(), Arc::new(MemoryStore::new()), clock);

    let flow = generator.generate("Order", DiagramType::Flowchart).await.unwrap();
    let state = generator.generate("Order", DiagramType::State).await.unwrap();

    assert!(flow.starts_with("flowchart TD"));
    assert!(state.starts_with("stateDiagram-v2"));
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let path = temp_path("restart");
    let _ = std::fs::remove_file(&path);
    let clock = Arc::new(ManualClock::new(START_MS));

    {
        let model = ScriptedModel::answering(&["classDiagram\n  class User"]);
        let store = Arc::new(FileStore::open(&path).await.unwrap());
        let generator = generator_over(model, store, clock.clone());
        generator.generate("Users", DiagramType::Class).await.unwrap();
    }

    clock.advance(Duration::from_secs(60));

    let model = ScriptedModel::answering(&[]);
    let store = Arc::new(FileStore::open(&path).await.unwrap());
    let generator = generator_over(model.clone(), store, clock);

    let code = generator.generate("Users", DiagramType::Class).await.unwrap();
    assert_eq!(code, "classDiagram\n  class User");
    assert_eq!(model.calls(), 0);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_legacy_policy_end_to_end() {
    let model = ScriptedModel::answering(&["flowchart TD\n  A[Start (now)] --> B[Done!]"]);
    let clock = Arc::new(ManualClock::new(START_MS));
    let cache = Arc::new(ExpiringCache::with_clock(
        Arc::new(MemoryStore::new()),
        DEFAULT_TTL,
        clock,
    ));
    let generator = Generator::new(model, cache).with_policy(SanitizePolicy::Legacy);

    let code = generator
        .generate("Quick flow", DiagramType::Flowchart)
        .await
        .unwrap();

    assert_eq!(code, "flowchart TD\nA[Start ] --> B[Done]");
}
