//! Tab renderers
//!
//! Pure functions from a record snapshot to the serializable view models in
//! [`crate::models`]. Nothing here touches the network or the clock.

pub mod metrics;
pub mod plan;
pub mod sql;


pub use metrics::*;
pub use plan::*;
pub use sql::*;

use crate::models::{
    FormatSettings, Header, NavLink, QueryRecord, Tab, TabContent, TabHeader, ViewSettings,
};

pub const TITLE: &str = "Query analyzer";
pub const BACK_LABEL: &str = "← Return to queries list";
pub const COPIED_NOTICE: &str = "Copied to clipboard!";

/// Content for the active tab, or `Loading` until a record with a query arrives
pub fn render_content(record: Option<&QueryRecord>, tab: Tab, format: &FormatSettings) -> TabContent {
    let record = match record {
        Some(record) if record.is_loaded() => record,
        _ => return TabContent::Loading,
    };

    match tab {
        Tab::Query => TabContent::Query(query_editor(record, format)),
        Tab::Metrics => TabContent::Metrics(metrics_view(record)),
        Tab::Explain => TabContent::Explain(explain_editor(record)),
        Tab::Examples => TabContent::Examples(examples_view(record)),
    }
}

pub fn header(settings: &ViewSettings) -> Header {
    Header {
        title: TITLE.to_string(),
        back: NavLink {
            label: BACK_LABEL.to_string(),
            href: settings.back_href.clone(),
        },
    }
}

pub fn tab_headers(active: Tab) -> Vec<TabHeader> {
    Tab::ALL
        .iter()
        .map(|&tab| TabHeader {
            tab,
            label: tab.label().to_string(),
            active: tab == active,
        })
        .collect()
}
