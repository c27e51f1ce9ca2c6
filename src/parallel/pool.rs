//! Rayon thread pool configuration for build evaluation.
//!
//! Use [WorkerPool::install] to run a parallel batch with a fixed number of
//! threads, or rely on Rayon's default (all CPU cores).

use rayon::{ThreadPool, ThreadPoolBuilder};

/// Configures how many worker threads evaluate a batch.
#[derive(Debug, Default)]
pub struct WorkerPool {
    /// `None` runs on the global Rayon pool.
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    /// Use all available CPU cores (Rayon default).
    pub fn default_workers() -> Self {
        Self::default()
    }

    /// Use exactly `n` worker threads; 0 means the Rayon default. The pool is
    /// built once and reused for every [install](WorkerPool::install).
    pub fn with_workers(n: usize) -> Self {
        if n == 0 {
            return Self::default();
        }
        match ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => Self { pool: Some(pool) },
            Err(err) => {
                tracing::warn!(workers = n, error = %err, "could not build thread pool; using the global pool");
                Self::default()
            }
        }
    }

    /// Threads a batch will run on.
    pub fn workers(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}
