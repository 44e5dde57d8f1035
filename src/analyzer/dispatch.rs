// src/analyzer/dispatch.rs
// =============================================================================
// This module drives a fixed-size pool of workers over the queue of URLs
// that need probing.
//
// How it works:
// 1. All pending URLs go into one shared FIFO queue
// 2. We spawn at most `limit` worker tasks
// 3. Each worker loops: pop a URL, probe it, record the outcome
// 4. A worker that finds the queue empty simply exits
// 5. dispatch() returns once every worker has finished
//
// The queue and the result map are the only shared state. Each is behind
// its own Mutex, locked only for the pop/insert itself - never across an
// .await - so workers cannot block one another beyond a momentary lock.
//
// Rust concepts:
// - Generics over closures: The probe function is injected, which keeps
//   this module free of networking and easy to test
// - Arc<Mutex<...>>: Shared mutable state between tasks
// - tokio::spawn + join_all: Running and then awaiting a pool of tasks
// =============================================================================

use futures::future::join_all;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};

use super::model::ProbeOutcome;

// Probes every URL in `urls`, never exceeding `limit` in-flight probes
//
// Parameters:
//   urls: the URLs to check, in discovery order (duplicates allowed)
//   limit: maximum number of concurrent probes (must be > 0)
//   probe: the async check to run per URL
//
// Returns: outcomes keyed by URL. When the same URL appears more than
// once, the first recorded outcome wins - the aggregator fans it back
// out to every occurrence anyway.
//
// Completion order is unspecified; callers that care about ordering
// re-impose it themselves.
pub async fn dispatch<F, Fut>(
    urls: Vec<String>,
    limit: usize,
    probe: F,
) -> HashMap<String, ProbeOutcome>
where
    F: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = ProbeOutcome> + Send + 'static,
{
    if urls.is_empty() {
        return HashMap::new();
    }

    // More workers than URLs would just be idle tasks
    let worker_count = limit.min(urls.len());

    let pending = Arc::new(Mutex::new(VecDeque::from(urls)));
    let results = Arc::new(Mutex::new(HashMap::new()));

    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let pending = Arc::clone(&pending);
        let results = Arc::clone(&results);
        let probe = probe.clone();

        workers.push(tokio::spawn(async move {
            loop {
                // The lock guard is a temporary inside this statement, so
                // it is released before we await the probe below
                let next = pending.lock().unwrap().pop_front();

                let Some(url) = next else {
                    // Queue drained - this worker is done
                    break;
                };

                let outcome = probe(url.clone()).await;

                // or_insert: first outcome for a URL wins
                results.lock().unwrap().entry(url).or_insert(outcome);
            }
        }));
    }

    // Wait for the whole pool; a panicked worker loses its in-flight item
    // but never wedges the run
    for joined in join_all(workers).await {
        if joined.is_err() {
            eprintln!("Warning: a probe worker panicked");
        }
    }

    // All workers have exited, so we hold the only reference again
    Arc::try_unwrap(results)
        .expect("workers still hold the result map")
        .into_inner()
        .expect("result map lock poisoned")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a shared queue instead of splitting the URLs up front?
//    - Probes take wildly different times (50ms vs a 10s timeout)
//    - With pre-split chunks, one unlucky worker gets all the slow URLs
//      while the others sit idle
//    - A shared queue means every worker stays busy until nothing is left
//
// 2. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - We only hold the lock for a pop or an insert - microseconds
//    - The async mutex is for locks held across .await points, which we
//      deliberately never do here
//
// 3. What is the `let Some(url) = next else { break }` syntax?
//    - A let-else: bind the value if the pattern matches, otherwise run
//      the else block (which must diverge - here, break out of the loop)
//
// 4. Why is `probe` a parameter instead of calling the real prober?
//    - Dependency injection: tests pass a fake probe and verify pool
//      behavior (concurrency bound, coverage) without any network
// -----------------------------------------------------------------------------
