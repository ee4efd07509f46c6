//! Bounded worker pool shared by the port scanner and the batch orchestrator.
//!
//! A fixed number of tokio tasks drain one shared queue; results land in a
//! slot per input item, so the output lines up with the input regardless of
//! completion order.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Called with the number of finished items after each completion.
pub type ProgressFn = Arc<dyn Fn(usize) + Send + Sync>;

/// Number of workers to start: at least one, never more than there is work.
pub fn worker_count(concurrency: usize, items: usize) -> usize {
    concurrency.max(1).min(items)
}

/// Runs `work` over every item with at most `concurrency` items in flight.
///
/// Each item is taken from the queue exactly once. The returned vector has
/// one slot per input, in input order; a slot is `None` only if that item
/// panicked. The worker that ran it carries on with the rest of the queue.
pub async fn run_bounded<T, R, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    progress: Option<ProgressFn>,
    work: F,
) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }

    let queue: Arc<Mutex<VecDeque<(usize, T)>>> =
        Arc::new(Mutex::new(items.into_iter().enumerate().collect()));
    let slots: Arc<Mutex<Vec<Option<R>>>> =
        Arc::new(Mutex::new((0..total).map(|_| None).collect()));
    let completed = Arc::new(AtomicUsize::new(0));
    let work = Arc::new(work);

    let workers = worker_count(concurrency, total);
    debug!(workers, items = total, "starting worker pool");

    let mut handles = JoinSet::new();
    for _ in 0..workers {
        let queue = queue.clone();
        let slots = slots.clone();
        let completed = completed.clone();
        let progress = progress.clone();
        let work = work.clone();

        handles.spawn(async move {
            loop {
                let next = queue.lock().await.pop_front();
                let Some((index, item)) = next else {
                    break;
                };

                // a panic in one item must not take the rest of the queue with it
                match tokio::spawn(work(item)).await {
                    Ok(output) => slots.lock().await[index] = Some(output),
                    Err(e) => error!("probe of item {index} stopped abnormally: {e}"),
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(report) = &progress {
                    report(done);
                }
            }
        });
    }

    while let Some(joined) = handles.join_next().await {
        if let Err(e) = joined {
            error!("probe worker stopped abnormally: {e}");
        }
    }

    let mut slots = slots.lock().await;
    std::mem::take(&mut *slots)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
