//! Shared fixtures for handler and pipeline tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::Config;
use crate::layout::default_page_config;
use crate::llm_client::{GenerativeModel, LlmError, Part};
use crate::state::AppState;
use crate::store::ArtifactStore;

enum StubReply {
    Text(String),
    Unavailable,
}

/// A `GenerativeModel` that returns a fixed reply and counts calls.
pub struct StubModel {
    reply: StubReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: StubReply::Text(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reply: StubReply::Unavailable,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn slow(text: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::replying(text)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, _parts: &[Part]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Unavailable => Err(LlmError::Api {
                status: 503,
                message: "model overloaded".into(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

/// A six-field analysis reply wrapped in a json code fence.
pub fn analysis_json(improved_cv_text: &str) -> String {
    let body = json!({
        "skills_to_highlight": ["Go", "Kubernetes"],
        "suggested_changes": ["Add metrics experience"],
        "missing_skills": ["Kafka"],
        "match_score": 72,
        "recommendations": "Emphasize distributed systems work",
        "improved_cv_text": improved_cv_text,
    });
    format!("```json\n{body}\n```")
}

pub fn test_config(root: &Path) -> Config {
    Config {
        gemini_api_key: "test-key".into(),
        gemini_model: "stub".into(),
        gemini_api_base: "http://127.0.0.1:9".into(),
        port: 0,
        upload_dir: root.join("uploads"),
        generated_dir: root.join("generated"),
        analysis_timeout: Duration::from_secs(30),
        max_upload_bytes: 10 * 1024 * 1024,
        rust_log: "debug".into(),
    }
}

/// State rooted at `root` with both store directories created.
pub async fn test_state(root: &Path, model: Arc<dyn GenerativeModel>) -> AppState {
    let config = test_config(root);
    let store = ArtifactStore::new(config.upload_dir.clone(), config.generated_dir.clone());
    store.ensure_dirs().await.unwrap();
    AppState {
        store,
        model,
        config,
        page_config: default_page_config(),
    }
}
