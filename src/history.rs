//! Bounded in-memory store of analysis results for the dashboard.

use serde::Serialize;
use std::sync::Mutex;

use crate::result::{BatchSummary, SentimentResult};

#[derive(Debug)]
pub struct ResultStore {
    inner: Mutex<Vec<SentimentResult>>,
    cap: usize,
}

/// Quick stats over everything currently stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    pub stored: usize,
    pub capacity: usize,
    #[serde(flatten)]
    pub summary: BatchSummary,
}

impl ResultStore {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, 100_000);
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Append results (newest last), evicting the oldest beyond capacity.
    pub fn extend<I: IntoIterator<Item = SentimentResult>>(&self, results: I) -> usize {
        let mut v = self.inner.lock().expect("result store mutex poisoned");
        v.extend(results);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
        v.len()
    }

    pub fn push(&self, result: SentimentResult) -> usize {
        self.extend(std::iter::once(result))
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<SentimentResult> {
        let v = self.inner.lock().expect("result store mutex poisoned");
        let start = v.len().saturating_sub(n);
        v[start..].to_vec()
    }

    pub fn snapshot(&self) -> Vec<SentimentResult> {
        self.inner.lock().expect("result store mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("result store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().expect("result store mutex poisoned").clear();
    }

    pub fn stats(&self) -> StoreStats {
        let v = self.inner.lock().expect("result store mutex poisoned");
        StoreStats {
            stored: v.len(),
            capacity: self.cap,
            summary: BatchSummary::from_results(&v),
        }
    }
}
