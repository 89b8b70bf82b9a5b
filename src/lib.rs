//! Query analyzer view for the HouseWatch ClickHouse dashboard
//!
//! Polls the analyze API for one normalized query and turns the latest
//! record into a serializable [`RenderedView`]: formatted SQL, per-day
//! metric charts, the EXPLAIN plan and example queries, behind four tabs.
//! Hosts paint the view model and forward clicks and tab changes.

pub mod api;
pub mod clipboard;
pub mod error;
pub mod export;
pub mod models;
pub mod poller;
pub mod render;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{HttpRecordSource, RecordSource};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use error::{Error, Result};
pub use models::{QueryRecord, RenderedView, Tab, ViewSettings};
pub use view::QueryDetailView;
