//! Transient storage for the current session's analysis.
//!
//! One slot: a new analysis replaces the previous one. Nothing is persisted,
//! so restarting the service discards it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::result::AnalysisResult;

#[derive(Debug, Clone, Serialize)]
pub struct StoredAnalysis {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub resume_file_name: String,
    pub analysis: AnalysisResult,
    pub warnings: Vec<String>,
}

impl StoredAnalysis {
    pub fn new(resume_file_name: String, analysis: AnalysisResult, warnings: Vec<String>) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            resume_file_name,
            analysis,
            warnings,
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<StoredAnalysis>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever analysis the session held.
    pub async fn replace(&self, analysis: StoredAnalysis) {
        *self.current.write().await = Some(analysis);
    }

    pub async fn current(&self) -> Option<StoredAnalysis> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_session_has_no_analysis() {
        assert!(SessionStore::new().current().await.is_none());
    }

    #[tokio::test]
    async fn test_new_analysis_replaces_previous() {
        let store = SessionStore::new();
        let first = StoredAnalysis::new("a.pdf".into(), AnalysisResult::fallback(), vec![]);
        let second = StoredAnalysis::new("b.docx".into(), AnalysisResult::fallback(), vec![]);
        let second_id = second.analysis_id;

        store.replace(first).await;
        store.replace(second).await;

        let current = store.current().await.unwrap();
        assert_eq!(current.analysis_id, second_id);
        assert_eq!(current.resume_file_name, "b.docx");
    }

    #[tokio::test]
    async fn test_clones_share_the_same_slot() {
        let store = SessionStore::new();
        let handle = store.clone();
        handle
            .replace(StoredAnalysis::new("cv.pdf".into(), AnalysisResult::fallback(), vec![]))
            .await;
        assert!(store.current().await.is_some());
    }
}
