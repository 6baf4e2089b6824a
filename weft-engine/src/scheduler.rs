//! The run loop: dispatch, pruning, failure handling, completion.
//!
//! Every node reaches exactly one terminal state (executed, pruned, or
//! skipped after a failure), and every terminal state runs the same
//! completion path: decrement each successor's in-degree, dispatch the ones
//! that hit zero, bump the finished counter, and wake the waiting caller
//! when the count reaches the total. Both sides of the wait predicate
//! (`finished == total`, `failed`) are monotonic, so the wait loop cannot
//! miss its terminal condition.
//!
//! All shared state lives in one heap-allocated [`RunState`] jointly owned
//! by every task closure, so the caller's stack unwinding can never
//! invalidate what an in-flight task references.

use crate::planner::ExecutionPlan;
use crate::pool::{PoolHandle, WorkerPool};
use crate::profiler::Profiler;
use parking_lot::{Condvar, Mutex};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use weft_core::{log_debug, log_error, log_info, Node, Result, WeftError, Workspace};

struct RunState {
    nodes: BTreeMap<String, Arc<dyn Node>>,
    plan: ExecutionPlan,
    ws: Workspace,
    finished: AtomicUsize,
    failed: AtomicBool,
    first_error: Mutex<Option<WeftError>>,
    completion: Mutex<()>,
    done: Condvar,
    profiler: Option<Profiler>,
}

impl RunState {
    fn record_failure(&self, name: &str, err: WeftError) {
        log_error!("node '{name}' failed: {err}");
        let wrapped = WeftError::NodeExecution {
            node: name.to_string(),
            cause: err.to_string(),
        };
        {
            let mut slot = self.first_error.lock();
            if slot.is_none() {
                *slot = Some(wrapped);
            }
        }
        self.failed.store(true, Ordering::Release);
        // Lock-then-notify pairs with the waiter's predicate recheck.
        let _guard = self.completion.lock();
        self.done.notify_all();
    }

    fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }
}

/// Run `nodes` against `ws` to completion.
///
/// Called with a freshly built plan; the node map and plan cover the same
/// names. Blocks until every node is terminal or a failure has been
/// observed, then returns the first captured error, if any.
pub(crate) fn execute(
    graph_name: &str,
    nodes: &BTreeMap<String, Arc<dyn Node>>,
    plan: ExecutionPlan,
    ws: &Workspace,
    num_threads: usize,
    profiling: bool,
) -> Result<()> {
    let num_threads = num_threads.max(1);
    let state = Arc::new(RunState {
        nodes: nodes.clone(),
        plan,
        ws: ws.clone(),
        finished: AtomicUsize::new(0),
        failed: AtomicBool::new(false),
        first_error: Mutex::new(None),
        completion: Mutex::new(()),
        done: Condvar::new(),
        profiler: profiling.then(Profiler::new),
    });

    log_info!(
        "starting graph '{graph_name}': {} nodes on {num_threads} worker threads",
        state.plan.total()
    );

    let pool = WorkerPool::new(num_threads);
    let handle = pool.handle();
    for root in state.plan.roots() {
        dispatch(&state, &handle, root);
    }

    {
        let mut guard = state.completion.lock();
        while state.finished.load(Ordering::Acquire) < state.plan.total() && !state.is_failed() {
            state.done.wait(&mut guard);
        }
    }

    // Joining the workers drains every queued task through its completion
    // path; under failure the queue may still hold skipped nodes.
    drop(handle);
    drop(pool);

    if let Some(profiler) = &state.profiler {
        profiler.print_report();
    }

    let taken_error = state.first_error.lock().take();
    match taken_error {
        Some(err) => Err(err),
        None => {
            log_info!("graph '{graph_name}' finished");
            Ok(())
        }
    }
}

/// Submit one node as a pool task.
///
/// Rejection is only possible while the post-failure teardown is already
/// draining the pool, where nothing waits on the finished count any more.
fn dispatch(state: &Arc<RunState>, pool: &PoolHandle, name: &str) {
    let task_state = Arc::clone(state);
    let task_pool = pool.clone();
    let task_name = name.to_string();
    if let Err(err) = pool.enqueue(move || run_node(&task_state, &task_pool, &task_name)) {
        debug_assert!(state.is_failed());
        log_debug!("node '{name}' not dispatched: {err}");
    }
}

/// Task body shared by every dispatched node: skip, prune, or execute, then
/// run the completion path.
fn run_node(state: &Arc<RunState>, pool: &PoolHandle, name: &str) {
    if state.is_failed() {
        log_debug!("skipping node '{name}' after earlier failure");
    } else {
        let node = state
            .nodes
            .get(name)
            .expect("plan references a graph node");
        let spec = node.spec();

        // All producers are terminal once in-degree hits zero and run-time
        // writes are never removed, so probing here observes exactly the
        // state the readiness transition would have seen.
        let live = spec.control_inputs.iter().all(|key| state.ws.has(key));
        if !live {
            log_debug!("pruning node '{name}': control input absent");
        } else {
            log_debug!("executing node '{name}'");
            let started = Instant::now();
            match panic::catch_unwind(AssertUnwindSafe(|| node.execute(&state.ws))) {
                Ok(Ok(())) => {
                    if let Some(profiler) = &state.profiler {
                        profiler.record(name, started.elapsed());
                    }
                }
                Ok(Err(err)) => state.record_failure(name, err),
                Err(payload) => state.record_failure(
                    name,
                    WeftError::NodeFailure {
                        cause: panic_message(payload.as_ref()),
                    },
                ),
            }
        }
    }

    complete(state, pool, name);
}

/// The single completion path for executed, pruned and skipped nodes.
fn complete(state: &Arc<RunState>, pool: &PoolHandle, name: &str) {
    for successor in state.plan.successors(name) {
        if state.plan.decrement(successor) == 0 {
            dispatch(state, pool, successor);
        }
    }

    let finished = state.finished.fetch_add(1, Ordering::AcqRel) + 1;
    if finished == state.plan.total() {
        let _guard = state.completion.lock();
        state.done.notify_all();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("node panicked: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("node panicked: {text}")
    } else {
        "node panicked".to_string()
    }
}
