use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use crate::models::{QueryRecord, Tab};

struct Snapshot {
    /// Latest applied record
    record: Option<Arc<QueryRecord>>,
    /// Sequence number of the request that produced `record`
    applied_seq: u64,
    /// Last sequence number handed out; survives poller restarts
    issued_seq: u64,
    active_tab: Tab,
    copied_notice: bool,
    /// Bumped on every notice show so a stale hide timer can be ignored
    notice_generation: u64,
}

/// View state shared between the poller, the notice timer and the host
pub struct ViewState {
    snapshot: Mutex<Snapshot>,
    /// Revision counter, bumped on every visible change
    revision: watch::Sender<u64>,
}

impl ViewState {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            snapshot: Mutex::new(Snapshot {
                record: None,
                applied_seq: 0,
                issued_seq: 0,
                active_tab: Tab::default(),
                copied_notice: false,
                notice_generation: 0,
            }),
            revision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // Every critical section leaves the snapshot consistent, so a poisoned lock is still usable
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Receiver that is notified whenever the rendered view may have changed
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Sequence number for a new request, always above any issued before
    pub fn next_seq(&self) -> u64 {
        let mut snapshot = self.lock();
        snapshot.issued_seq += 1;
        snapshot.issued_seq
    }

    /// Publish the record fetched by request `seq`.
    ///
    /// Returns false and leaves the state untouched when a newer request has
    /// already been applied.
    pub fn publish(&self, seq: u64, record: QueryRecord) -> bool {
        {
            let mut snapshot = self.lock();
            if seq <= snapshot.applied_seq {
                return false;
            }
            snapshot.applied_seq = seq;
            snapshot.record = Some(Arc::new(record));
        }
        self.bump();
        true
    }

    pub fn record(&self) -> Option<Arc<QueryRecord>> {
        self.lock().record.clone()
    }

    pub fn applied_seq(&self) -> u64 {
        self.lock().applied_seq
    }

    pub fn active_tab(&self) -> Tab {
        self.lock().active_tab
    }

    pub fn set_active_tab(&self, tab: Tab) {
        let changed = {
            let mut snapshot = self.lock();
            let changed = snapshot.active_tab != tab;
            snapshot.active_tab = tab;
            changed
        };
        if changed {
            self.bump();
        }
    }

    pub fn copied_notice(&self) -> bool {
        self.lock().copied_notice
    }

    /// Show the copied notice and return the generation a hide timer must match
    pub fn show_notice(&self) -> u64 {
        let generation = {
            let mut snapshot = self.lock();
            snapshot.copied_notice = true;
            snapshot.notice_generation += 1;
            snapshot.notice_generation
        };
        self.bump();
        generation
    }

    /// Hide the notice if no newer show has happened since `generation`
    pub fn hide_notice(&self, generation: u64) -> bool {
        let hidden = {
            let mut snapshot = self.lock();
            if snapshot.notice_generation != generation || !snapshot.copied_notice {
                false
            } else {
                snapshot.copied_notice = false;
                true
            }
        };
        if hidden {
            self.bump();
        }
        hidden
    }

    /// Hide the notice unconditionally
    pub fn clear_notice(&self) {
        let was_visible = {
            let mut snapshot = self.lock();
            std::mem::replace(&mut snapshot.copied_notice, false)
        };
        if was_visible {
            self.bump();
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
