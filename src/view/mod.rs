use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::RecordSource;
use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::export::metrics_to_csv;
use crate::models::{QueryRecord, RenderedView, Tab, ViewSettings};
use crate::poller::Poller;
use crate::render;
use crate::state::ViewState;

/// The query analyzer screen for one query hash.
///
/// Owns its poller and notice timer; both are stopped by [`unmount`] or on drop.
///
/// [`unmount`]: QueryDetailView::unmount
pub struct QueryDetailView {
    query_hash: String,
    settings: ViewSettings,
    source: Arc<dyn RecordSource>,
    clipboard: Arc<dyn Clipboard>,
    state: Arc<ViewState>,
    poller: Poller,
    notice_timer: Mutex<Option<JoinHandle<()>>>,
}

impl QueryDetailView {
    pub fn new(
        query_hash: impl Into<String>,
        settings: ViewSettings,
        source: Arc<dyn RecordSource>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        QueryDetailView {
            query_hash: query_hash.into(),
            settings,
            source,
            clipboard,
            state: Arc::new(ViewState::new()),
            poller: Poller::new(),
            notice_timer: Mutex::new(None),
        }
    }

    pub fn query_hash(&self) -> &str {
        &self.query_hash
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Start polling. Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        log::info!("Mounting query detail view for {}", self.query_hash);
        self.poller.start(
            self.query_hash.clone(),
            self.settings.poll.interval(),
            Arc::clone(&self.source),
            Arc::clone(&self.state),
        );
    }

    /// Stop polling, abort in-flight requests and the notice timer
    pub fn unmount(&mut self) {
        if self.poller.is_running() {
            log::info!("Unmounting query detail view for {}", self.query_hash);
        }
        self.poller.stop();
        if let Some(timer) = self.take_notice_timer() {
            timer.abort();
        }
        self.state.clear_notice();
    }

    pub fn is_mounted(&self) -> bool {
        self.poller.is_running()
    }

    /// Switch tabs. Never refetches and never touches the loaded record.
    pub fn select_tab(&self, tab: Tab) {
        self.state.set_active_tab(tab);
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab()
    }

    /// Latest applied record, if any
    pub fn record(&self) -> Option<Arc<QueryRecord>> {
        self.state.record()
    }

    /// Notified with a new revision whenever [`render`](Self::render) may return something different
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub fn render(&self) -> RenderedView {
        let record = self.state.record();
        let active = self.state.active_tab();

        RenderedView {
            header: render::header(&self.settings),
            tabs: render::tab_headers(active),
            copied_notice: self
                .state
                .copied_notice()
                .then(|| render::COPIED_NOTICE.to_string()),
            content: render::render_content(record.as_deref(), active, &self.settings.format),
        }
    }

    /// Handle a click on the active tab's display area.
    ///
    /// On the query tab this copies the original query, on the explain tab the
    /// joined plan text. Returns whether anything was copied. Clipboard errors
    /// are logged and swallowed. The copied notice is only shown when called
    /// from within a tokio runtime, which schedules its auto-hide.
    pub fn click_display(&self) -> bool {
        let Some(record) = self.state.record().filter(|record| record.is_loaded()) else {
            return false;
        };

        let text = match self.state.active_tab() {
            Tab::Query => record.query_text().to_string(),
            Tab::Explain => record.explain_text(),
            Tab::Metrics | Tab::Examples => return false,
        };

        if let Err(e) = self.clipboard.write_text(&text) {
            log::warn!("Failed to copy to clipboard: {}", e);
            return false;
        }

        self.show_copied_notice();
        true
    }

    fn show_copied_notice(&self) {
        // Without a runtime nothing could hide the notice again
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::debug!("No tokio runtime, skipping copied notice");
            return;
        };

        let generation = self.state.show_notice();
        let state = Arc::clone(&self.state);
        let duration = self.settings.notice.copied();

        let timer = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            state.hide_notice(generation);
        });

        let mut slot = self.notice_timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(timer) {
            previous.abort();
        }
    }

    fn take_notice_timer(&self) -> Option<JoinHandle<()>> {
        self.notice_timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Metrics of the current record as CSV, `None` until a record is loaded
    pub fn export_metrics_csv(&self) -> Option<Result<String>> {
        let record = self.state.record().filter(|record| record.is_loaded())?;
        Some(metrics_to_csv(&render::metrics_view(&record)))
    }
}

impl Drop for QueryDetailView {
    fn drop(&mut self) {
        self.unmount();
    }
}
