use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Query,
    Metrics,
    Explain,
    Examples,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Query, Tab::Metrics, Tab::Explain, Tab::Examples];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Query => "Query",
            Tab::Metrics => "Metrics",
            Tab::Explain => "EXPLAIN",
            Tab::Examples => "Example queries",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Query => write!(f, "query"),
            Tab::Metrics => write!(f, "metrics"),
            Tab::Explain => write!(f, "explain"),
            Tab::Examples => write!(f, "examples"),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(Tab::Query),
            "metrics" => Ok(Tab::Metrics),
            "explain" => Ok(Tab::Explain),
            "examples" => Ok(Tab::Examples),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

/// Highlighting grammar the host should apply to an editor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Sql,
    Yaml,
}

/// A read-only code editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub text: String,
    pub language: Highlight,
    /// Text placed on the clipboard when the editor is clicked, if clicking copies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_text: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ExecutionCount,
    ReadBytes,
    MemoryUsage,
    Cpu,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Count,
    Gigabytes,
    Seconds,
}

impl Unit {
    /// Convert a raw backend total into this display unit
    pub fn convert(&self, raw: f64) -> f64 {
        match self {
            Unit::Count | Unit::Seconds => raw,
            Unit::Gigabytes => raw / 1_000_000_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// ISO date, `YYYY-MM-DD`
    pub day: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub metric: Metric,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    pub unit: Unit,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_tick_count: Option<u32>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsView {
    pub charts: Vec<ChartView>,
}

impl MetricsView {
    pub fn chart(&self, metric: Metric) -> Option<&ChartView> {
        self.charts.iter().find(|chart| chart.metric == metric)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamplesView {
    pub columns: Vec<String>,
    pub rows: Vec<EditorView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TabContent {
    Loading,
    Query(EditorView),
    Metrics(MetricsView),
    Explain(EditorView),
    Examples(ExamplesView),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub back: NavLink,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabHeader {
    pub tab: Tab,
    pub label: String,
    pub active: bool,
}

/// Everything a host needs to paint the query analyzer screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedView {
    pub header: Header,
    pub tabs: Vec<TabHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copied_notice: Option<String>,
    pub content: TabContent,
}
