//! Storage for the most recent analysis.
//!
//! The question-answering side of the service reads the last analysis as
//! conversational context. The slot holds an `Arc` snapshot: writers swap
//! the whole value, readers clone the pointer, so nobody ever sees a result
//! that is half built.

use crate::analysis::engine::AnalysisResult;
use std::sync::{Arc, PoisonError, RwLock};

/// A single-slot repository for the last successful analysis.
///
/// Implement this to keep results per session or in an external cache;
/// the calculations never touch the store directly.
pub trait AnalysisStore: Send + Sync {
    /// The last stored analysis, or `None` if nothing has been analyzed.
    fn last(&self) -> Option<Arc<AnalysisResult>>;

    /// Replace the stored analysis wholesale.
    fn replace(&self, result: Arc<AnalysisResult>);
}

impl<S: AnalysisStore + ?Sized> AnalysisStore for Arc<S> {
    fn last(&self) -> Option<Arc<AnalysisResult>> {
        (**self).last()
    }

    fn replace(&self, result: Arc<AnalysisResult>) {
        (**self).replace(result)
    }
}

/// Process-local store behind a read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryAnalysisStore {
    slot: RwLock<Option<Arc<AnalysisResult>>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisStore for InMemoryAnalysisStore {
    fn last(&self) -> Option<Arc<AnalysisResult>> {
        // The slot is only ever assigned whole, so a poisoned lock still
        // holds a complete value.
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, result: Arc<AnalysisResult>) {
        log::debug!("replacing last analysis with {}", result.id);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(result);
    }
}
