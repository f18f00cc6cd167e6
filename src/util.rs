//! Timing of builds and batches for the log.

use std::time::{Duration, Instant};

/// Logs how long a pass over `items` points or queries took, and the time per item,
/// when dropped.
///
/// ```ignore
/// let _t = Timed::build(points.len());
/// // logs "kd-tree build: 100000 items in 8.120ms (81ns each)" at DEBUG level
/// ```
pub(crate) struct Timed {
    what: &'static str,
    items: usize,
    start: Instant,
    level: log::Level,
}

impl Timed {
    /// Build of a tree over `points` points, logged at DEBUG level.
    pub(crate) fn build(points: usize) -> Self {
        Self::start("kd-tree build", points, log::Level::Debug)
    }

    /// A batch of `queries` queries. Batches can run every frame, so these go to TRACE.
    pub(crate) fn batch(what: &'static str, queries: usize) -> Self {
        Self::start(what, queries, log::Level::Trace)
    }

    fn start(what: &'static str, items: usize, level: log::Level) -> Self {
        Timed {
            what,
            items,
            start: Instant::now(),
            level,
        }
    }
}

fn per_item(elapsed: Duration, items: usize) -> Duration {
    let nanos = elapsed.as_nanos() / items.max(1) as u128;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

impl Drop for Timed {
    fn drop(&mut self) {
        if !log::log_enabled!(self.level) {
            return;
        }
        let elapsed = self.start.elapsed();
        log::log!(
            self.level,
            "{}: {} items in {:.3?} ({:?} each)",
            self.what,
            self.items,
            elapsed,
            per_item(elapsed, self.items)
        );
    }
}
