//! Cancellable repeating fetch of one query's record
//!
//! Every tick runs its fetch as a separate task and tags it with a sequence
//! number drawn from [`ViewState`], so numbering carries over restarts.
//! Results are handed to [`ViewState::publish`], which drops any response
//! older than the one already on screen. Stopping the poller aborts the
//! schedule together with every request still in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::api::RecordSource;
use crate::error::Result;
use crate::models::QueryRecord;
use crate::state::ViewState;

pub struct Poller {
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new() -> Self {
        Poller { handle: None }
    }

    /// Start polling `query_hash` every `interval`, first fetch immediately.
    /// Restarts the schedule if it is already running.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start(
        &mut self,
        query_hash: String,
        interval: Duration,
        source: Arc<dyn RecordSource>,
        state: Arc<ViewState>,
    ) {
        self.stop();
        log::debug!("Starting poller for query {} every {:?}", query_hash, interval);
        self.handle = Some(tokio::spawn(run(query_hash, interval, source, state)));
    }

    /// Stop the schedule and abort in-flight requests
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log::debug!("Poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(
    query_hash: String,
    interval: Duration,
    source: Arc<dyn RecordSource>,
    state: Arc<ViewState>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Dropped with this task on abort, which aborts the fetches it holds
    let mut in_flight: JoinSet<(u64, Result<QueryRecord>)> = JoinSet::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let seq = state.next_seq();
                let source = Arc::clone(&source);
                let query_hash = query_hash.clone();
                log::debug!("Poll #{} for query {} ({} in flight)", seq, query_hash, in_flight.len());
                in_flight.spawn(async move {
                    let result = source.fetch(&query_hash).await;
                    (seq, result)
                });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok((seq, Ok(record))) => {
                        if !state.publish(seq, record) {
                            log::debug!("Discarding stale response for poll #{}", seq);
                        }
                    }
                    Ok((seq, Err(e))) => {
                        log::warn!("Poll #{} for query {} failed: {}", seq, query_hash, e);
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => {
                        log::warn!("Poll task for query {} panicked: {}", query_hash, e);
                    }
                }
            }
        }
    }
}
