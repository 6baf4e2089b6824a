//! Fixed-size worker pool.
//!
//! A shared FIFO queue guarded by a mutex and signaled through a condition
//! variable feeds a fixed set of OS threads. The pool knows nothing about
//! its callers; all scheduling intelligence lives in the task closures.
//!
//! Shutdown happens on drop: the stop flag is raised, every worker is woken,
//! and each drains the remaining queue before exiting. Tasks submitted after
//! shutdown begins are rejected with [`WeftError::PoolStopped`].

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::JoinHandle;
use weft_core::{log_warn, Result, WeftError};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Shared {
    state: Mutex<State>,
    available: Condvar,
}

#[derive(Default)]
struct State {
    queue: VecDeque<Job>,
    stop: bool,
}

/// Cheap-clone submission handle onto a [`WorkerPool`]'s queue.
///
/// Handles may outlive the pool itself; submissions made after the pool has
/// dropped fail with [`WeftError::PoolStopped`].
#[derive(Clone)]
pub struct PoolHandle {
    shared: Arc<Shared>,
}

impl PoolHandle {
    /// Push a task onto the queue and wake one worker.
    pub fn enqueue<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        if state.stop {
            return Err(WeftError::PoolStopped);
        }
        state.queue.push_back(Box::new(job));
        drop(state);
        self.shared.available.notify_one();
        Ok(())
    }
}

/// Fixed pool of worker threads draining a FIFO task queue.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn a pool with `num_threads` workers. A request for zero workers
    /// is coerced up to one, since an empty pool could never drain its
    /// queue.
    pub fn new(num_threads: usize) -> Self {
        let count = num_threads.max(1);
        let shared = Arc::new(Shared {
            state: Mutex::new(State::default()),
            available: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(count);
        for index in 0..count {
            let worker_shared = Arc::clone(&shared);
            let handle = std::thread::Builder::new()
                .name(format!("weft-worker-{index}"))
                .spawn(move || worker_loop(&worker_shared));
            match handle {
                Ok(handle) => workers.push(handle),
                Err(err) => log_warn!("failed to spawn worker thread {index}: {err}"),
            }
        }

        Self { shared, workers }
    }

    /// A submission handle for this pool.
    pub fn handle(&self) -> PoolHandle {
        PoolHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of worker threads actually running.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.stop = true;
        }
        self.shared.available.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let job = {
            let mut state = shared.state.lock();
            loop {
                if let Some(job) = state.queue.pop_front() {
                    break job;
                }
                if state.stop {
                    return;
                }
                shared.available.wait(&mut state);
            }
        };
        job();
    }
}
