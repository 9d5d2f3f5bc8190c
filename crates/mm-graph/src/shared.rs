//! Shared handle with single-writer / multi-reader access.

use crate::MultimodeGraph;
use mm_types::NodeId;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle to one graph. Mutations take the write guard and exclude every other
/// caller; extraction and inference over the read guard may run concurrently.
#[derive(Debug)]
pub struct SharedGraph<N> {
    inner: Arc<RwLock<MultimodeGraph<N>>>,
}

impl<N> Clone for SharedGraph<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: NodeId> Default for SharedGraph<N> {
    fn default() -> Self {
        Self::new(MultimodeGraph::new())
    }
}

impl<N: NodeId> SharedGraph<N> {
    pub fn new(graph: MultimodeGraph<N>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MultimodeGraph<N>> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, MultimodeGraph<N>> {
        self.inner.write().await
    }
}
