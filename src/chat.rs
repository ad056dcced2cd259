//! Chat Loop
//!
//! Follow-up questions about the analyzed document. Each question is sent
//! with the full document text as context.
//!
//! Several questions may be outstanding at once. Every question is numbered
//! when it is submitted and its answer is stored in that slot, so the
//! transcript always reads in submission order no matter which response
//! arrives first.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::model::ChatTurn;
use crate::session::{self, SessionStore};
use crate::transport::{AnalysisBackend, TransportError};

/// State of one question/answer exchange
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeStatus {
    AwaitingAnswer,
    Answered {
        answer: String,
        answered_at: DateTime<Utc>,
    },
    Failed {
        reason: String,
    },
}

/// A question and whatever came back for it
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub seq: u64,
    pub question: String,
    pub asked_at: DateTime<Utc>,
    pub status: ExchangeStatus,
}

/// Append-only record of the conversation, in submission order
#[derive(Debug, Default)]
pub struct Transcript {
    exchanges: Vec<Exchange>,
    next_seq: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a question and return its sequence number
    fn begin(&mut self, question: &str) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.exchanges.push(Exchange {
            seq,
            question: question.to_string(),
            asked_at: Utc::now(),
            status: ExchangeStatus::AwaitingAnswer,
        });
        seq
    }

    /// Settle the exchange numbered `seq`
    fn complete(&mut self, seq: u64, status: ExchangeStatus) {
        // exchanges are pushed in seq order, so the slot is found by search
        if let Ok(index) = self.exchanges.binary_search_by_key(&seq, |e| e.seq) {
            self.exchanges[index].status = status;
        }
    }

    /// Every exchange, oldest first
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Flattened turns: each question followed by its answer, if any
    pub fn turns(&self) -> Vec<ChatTurn> {
        let mut turns = Vec::with_capacity(self.exchanges.len() * 2);
        for exchange in &self.exchanges {
            turns.push(ChatTurn::user(exchange.question.as_str()));
            if let ExchangeStatus::Answered { answer, .. } = &exchange.status {
                turns.push(ChatTurn::assistant(answer.as_str()));
            }
        }
        turns
    }

    /// Number of questions still waiting for a response
    pub fn pending(&self) -> usize {
        self.exchanges
            .iter()
            .filter(|e| e.status == ExchangeStatus::AwaitingAnswer)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

/// Question/answer loop over one analyzed document
pub struct ChatLoop {
    backend: Arc<dyn AnalysisBackend>,
    context: String,
    transcript: RwLock<Transcript>,
}

impl ChatLoop {
    /// Create a chat loop with `context` as the document text
    pub fn new(backend: Arc<dyn AnalysisBackend>, context: impl Into<String>) -> Self {
        Self {
            backend,
            context: context.into(),
            transcript: RwLock::new(Transcript::new()),
        }
    }

    /// Create a chat loop using the document text held by the session store
    pub fn from_session(backend: Arc<dyn AnalysisBackend>, store: &dyn SessionStore) -> Result<Self> {
        let context = session::document_text(store)?.ok_or(Error::MissingSessionData)?;
        Ok(Self::new(backend, context))
    }

    /// Ask a question
    ///
    /// Blank input is ignored and yields `Ok(None)`. The question is recorded
    /// before the request is sent. On failure the exchange is marked failed,
    /// no assistant turn is added, and the error is returned.
    pub async fn ask(&self, input: &str) -> std::result::Result<Option<String>, TransportError> {
        let question = input.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let seq = self.transcript.write().await.begin(question);
        tracing::debug!(seq, "Question submitted");

        match self.backend.ask_question(question, &self.context).await {
            Ok(answer) => {
                self.transcript.write().await.complete(
                    seq,
                    ExchangeStatus::Answered {
                        answer: answer.clone(),
                        answered_at: Utc::now(),
                    },
                );
                tracing::debug!(seq, answer_len = answer.len(), "Question answered");
                Ok(Some(answer))
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "Chat request failed");
                self.transcript.write().await.complete(
                    seq,
                    ExchangeStatus::Failed {
                        reason: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Snapshot of the conversation as turns
    pub async fn turns(&self) -> Vec<ChatTurn> {
        self.transcript.read().await.turns()
    }

    /// Snapshot of every exchange
    pub async fn exchanges(&self) -> Vec<Exchange> {
        self.transcript.read().await.exchanges().to_vec()
    }

    /// Number of questions still waiting for a response
    pub async fn pending(&self) -> usize {
        self.transcript.read().await.pending()
    }

    /// Document text sent with every question
    pub fn context(&self) -> &str {
        &self.context
    }
}
