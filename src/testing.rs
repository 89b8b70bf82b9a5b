//! Test doubles shared by the unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::RecordSource;
use crate::clipboard::Clipboard;
use crate::error::{Error, Result};
use crate::models::QueryRecord;

pub fn record(query: &str) -> QueryRecord {
    QueryRecord {
        query: Some(query.to_string()),
        ..QueryRecord::default()
    }
}

struct Step {
    delay: Duration,
    response: Result<QueryRecord>,
}

/// Source that plays back scripted responses, then answers `call N` immediately
#[derive(Default)]
pub struct ScriptedSource {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Step>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, delay_ms: u64, record: QueryRecord) -> Self {
        self.push(delay_ms, Ok(record))
    }

    pub fn fail(self, delay_ms: u64, error: Error) -> Self {
        self.push(delay_ms, Err(error))
    }

    fn push(self, delay_ms: u64, response: Result<QueryRecord>) -> Self {
        self.script.lock().unwrap().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            response,
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch(&self, _query_hash: &str) -> Result<QueryRecord> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                tokio::time::sleep(step.delay).await;
                step.response
            }
            None => Ok(record(&format!("call {}", call))),
        }
    }
}

pub struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(Error::Clipboard("clipboard unavailable".to_string()))
    }
}
