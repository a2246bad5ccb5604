//! Caller-owned engine handle backed by one dedicated worker task.
//!
//! All corpus mutations and queries travel over a single unbounded channel
//! and are processed strictly in FIFO order, never concurrently. The store
//! swaps immutable snapshots, so a retrieval that raced a rebuild still
//! reads a consistent corpus. A panic inside query processing is caught at
//! the worker boundary and reported as an internal-error answer.

use std::panic::AssertUnwindSafe;

use docwise_corpus::{ChunkStore, Chunker, Document, RetrievalConfig, ScoredChunk};
use docwise_lexical::enhanced_similarity;
use tokio::sync::{mpsc, oneshot};

use crate::answer::{Answer, Degenerate};
use crate::classify::classify;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::synthesize::synthesize;

enum Command {
    AddDocument(Document),
    RemoveDocument(String),
    Clear,
    Ask {
        query: String,
        reply: oneshot::Sender<Answer>,
    },
    ChunkCount(oneshot::Sender<usize>),
    DocumentNames(oneshot::Sender<Vec<String>>),
}

/// Handle to a running engine. Cloneable; all clones feed the same worker.
#[derive(Debug, Clone)]
pub struct Engine {
    tx: mpsc::UnboundedSender<Command>,
}

impl Engine {
    /// Spawn the worker task. Must be called inside a tokio runtime.
    /// The worker stops when the last handle is dropped.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Worker::new(config);
        tokio::spawn(worker.run(rx));
        Self { tx }
    }

    /// Chunk a document and add it to the corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped.
    pub fn add_document(&self, document: Document) -> Result<(), EngineError> {
        self.tx
            .send(Command::AddDocument(document))
            .map_err(|_| EngineError::WorkerGone)
    }

    /// Remove a document by id and rebuild the corpus from the survivors.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped.
    pub fn remove_document(&self, id: impl Into<String>) -> Result<(), EngineError> {
        self.tx
            .send(Command::RemoveDocument(id.into()))
            .map_err(|_| EngineError::WorkerGone)
    }

    /// Drop all documents and chunks.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped.
    pub fn clear(&self) -> Result<(), EngineError> {
        self.tx.send(Command::Clear).map_err(|_| EngineError::WorkerGone)
    }

    /// Answer a question against the current corpus. Always resolves to
    /// text; degenerate inputs get fixed messages with zero confidence.
    ///
    /// # Errors
    ///
    /// Returns an error only if the worker has stopped.
    pub async fn ask(&self, query: impl Into<String>) -> Result<Answer, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Ask {
                query: query.into(),
                reply,
            })
            .map_err(|_| EngineError::WorkerGone)?;
        rx.await.map_err(|_| EngineError::WorkerGone)
    }

    /// # Errors
    ///
    /// Returns an error if the worker has stopped.
    pub async fn chunk_count(&self) -> Result<usize, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::ChunkCount(reply))
            .map_err(|_| EngineError::WorkerGone)?;
        rx.await.map_err(|_| EngineError::WorkerGone)
    }

    /// Display names of registered documents in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped.
    pub async fn document_names(&self) -> Result<Vec<String>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::DocumentNames(reply))
            .map_err(|_| EngineError::WorkerGone)?;
        rx.await.map_err(|_| EngineError::WorkerGone)
    }
}

struct Worker {
    chunker: Chunker,
    retrieval: RetrievalConfig,
    store: ChunkStore,
    documents: Vec<Document>,
}

impl Worker {
    fn new(config: EngineConfig) -> Self {
        Self {
            chunker: Chunker::new(config.chunker),
            retrieval: config.retrieval,
            store: ChunkStore::new(),
            documents: Vec::new(),
        }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = rx.recv().await {
            self.handle(command);
        }
        tracing::debug!("engine worker stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::AddDocument(document) => self.add_document(document),
            Command::RemoveDocument(id) => self.remove_document(&id),
            Command::Clear => {
                self.documents.clear();
                self.store.clear();
                tracing::info!("corpus cleared");
            }
            Command::Ask { query, reply } => {
                let answer = self.answer_guarded(&query);
                let _ = reply.send(answer);
            }
            Command::ChunkCount(reply) => {
                let _ = reply.send(self.store.len());
            }
            Command::DocumentNames(reply) => {
                let names = self
                    .documents
                    .iter()
                    .map(|d| d.display_name.clone())
                    .collect();
                let _ = reply.send(names);
            }
        }
    }

    fn add_document(&mut self, document: Document) {
        if self.documents.iter().any(|d| d.id == document.id) {
            // Re-adding an existing id replaces its content.
            self.documents.retain(|d| d.id != document.id);
            self.documents.push(document);
            self.rebuild();
        } else {
            let chunks = self.chunker.chunk(&document);
            tracing::info!(
                document_id = %document.id,
                chunks = chunks.len(),
                "document ingested"
            );
            self.store.append(chunks);
            self.documents.push(document);
        }
    }

    fn remove_document(&mut self, id: &str) {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        if self.documents.len() < before {
            self.rebuild();
            tracing::info!(document_id = %id, "document removed");
        } else {
            tracing::warn!(document_id = %id, "remove requested for unknown document");
        }
    }

    fn rebuild(&self) {
        let chunks = self
            .documents
            .iter()
            .flat_map(|d| self.chunker.chunk(d))
            .collect();
        self.store.replace_all(chunks);
    }

    fn answer_guarded(&self, query: &str) -> Answer {
        match std::panic::catch_unwind(AssertUnwindSafe(|| self.answer(query))) {
            Ok(answer) => answer,
            Err(payload) => {
                let detail = panic_detail(payload.as_ref());
                tracing::warn!("query processing panicked: {detail}");
                Answer::internal_error(detail)
            }
        }
    }

    fn answer(&self, query: &str) -> Answer {
        if self.documents.is_empty() {
            return Answer::degenerate(Degenerate::EmptyCorpus);
        }
        if query.trim().is_empty() {
            return Answer::degenerate(Degenerate::BlankQuery);
        }

        let candidates = self.store.retrieve(query, &self.retrieval);
        if candidates.is_empty() {
            return Answer::degenerate(Degenerate::NoCandidates);
        }

        let reranked = rerank_and_filter(query, candidates);
        if reranked.is_empty() {
            return Answer::degenerate(Degenerate::BelowThreshold);
        }

        let classification = classify(query);
        let texts: Vec<&str> = reranked.iter().map(|s| s.chunk.text.as_str()).collect();
        let text = synthesize(&classification, &texts);

        tracing::debug!(
            query_type = classification.primary_type.as_str(),
            sources = reranked.len(),
            "answer synthesized"
        );

        Answer {
            text,
            confidence: reranked[0].score,
            primary_source: Some(reranked[0].chunk.source_display_name.clone()),
            supplementary_source_count: reranked.len() - 1,
        }
    }
}

/// Re-score retrieval candidates with the capped relevance used for the
/// dynamic threshold and the reported confidence, then drop everything
/// under `max(0.1, top * 0.3)`. A lone candidate always survives.
fn rerank_and_filter(query: &str, mut candidates: Vec<ScoredChunk>) -> Vec<ScoredChunk> {
    let query_lower = query.to_lowercase();
    for candidate in &mut candidates {
        let base = enhanced_similarity(query, &candidate.chunk.text);
        let boost = exact_word_fraction(&query_lower, &candidate.chunk.text.to_lowercase()) * 0.3;
        candidate.score = (base + boost).min(1.0);
    }
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if candidates.len() > 1 {
        let threshold = (candidates[0].score * 0.3).max(0.1);
        candidates.retain(|c| c.score >= threshold);
    }
    candidates
}

/// Fraction of all query words, length >2, appearing anywhere in the text.
#[allow(clippy::cast_precision_loss)]
fn exact_word_fraction(query_lower: &str, content_lower: &str) -> f64 {
    let words: Vec<&str> = query_lower.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let hits = words
        .iter()
        .filter(|word| word.len() > 2 && content_lower.contains(**word))
        .count();
    hits as f64 / words.len() as f64
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
