//! In-process backends for unit tests

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

use super::{AnalysisBackend, DocumentUpload, TransportError};
use crate::model::AnalysisResult;

/// Backend that replays queued responses and counts calls
#[derive(Default)]
pub struct ScriptedBackend {
    analyses: Mutex<VecDeque<Result<AnalysisResult, TransportError>>>,
    answers: Mutex<VecDeque<Result<String, TransportError>>>,
    pub uploads: Mutex<Vec<DocumentUpload>>,
    pub urls: Mutex<Vec<String>>,
    pub questions: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(self, response: Result<AnalysisResult, TransportError>) -> Self {
        self.analyses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_answer(self, response: Result<String, TransportError>) -> Self {
        self.answers.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_analysis(&self) -> Result<AnalysisResult, TransportError> {
        self.analyses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted analysis".to_string())))
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn analyze_document(
        &self,
        upload: &DocumentUpload,
    ) -> Result<AnalysisResult, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(upload.clone());
        self.next_analysis()
    }

    async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        self.next_analysis()
    }

    async fn ask_question(&self, question: &str, context: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.questions
            .lock()
            .unwrap()
            .push((question.to_string(), context.to_string()));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted answer".to_string())))
    }
}

/// Backend whose answers are released by the test, one question at a time
#[derive(Default)]
pub struct GatedBackend {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<String, TransportError>>>>,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `question`; its answer is whatever is later sent on the returned handle
    pub fn gate(&self, question: &str) -> oneshot::Sender<Result<String, TransportError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(question.to_string(), rx);
        tx
    }
}

#[async_trait]
impl AnalysisBackend for GatedBackend {
    async fn analyze_document(&self, _: &DocumentUpload) -> Result<AnalysisResult, TransportError> {
        Err(TransportError::Network("not scripted".to_string()))
    }

    async fn analyze_url(&self, _: &str) -> Result<AnalysisResult, TransportError> {
        Err(TransportError::Network("not scripted".to_string()))
    }

    async fn ask_question(&self, question: &str, _context: &str) -> Result<String, TransportError> {
        let rx = self.gates.lock().unwrap().remove(question);
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_string()))),
            None => Err(TransportError::Network(format!("no gate for {}", question))),
        }
    }
}
