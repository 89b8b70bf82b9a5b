use serde::{Deserialize, Deserializer, Serialize};

/// One day of a metric time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Start of the day bucket as sent by the backend (RFC 3339 or ClickHouse DateTime text)
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub day_start: String,
    #[serde(default, deserialize_with = "deserialize_total")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRow {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub explain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleQuery {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub query: String,
}

/// Analytics payload for a single normalized query.
///
/// Every field is optional on the wire. A record without `query` is treated
/// as "not loaded yet" by the view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub execution_count: Vec<SeriesPoint>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub read_bytes: Vec<SeriesPoint>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub memory_usage: Vec<SeriesPoint>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub cpu: Vec<SeriesPoint>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub explain: Vec<ExplainRow>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub example_queries: Vec<ExampleQuery>,
}

impl QueryRecord {
    /// Raw query text, empty when the backend has not sent one
    pub fn query_text(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// Whether the record carries enough data to leave the loading state
    pub fn is_loaded(&self) -> bool {
        !self.query_text().is_empty()
    }

    /// Plan lines joined with newlines
    pub fn explain_text(&self) -> String {
        self.explain
            .iter()
            .map(|row| row.explain.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Accept `null` wherever a list is expected
fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` text cell degrades to an empty string instead of failing the record
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// ClickHouse quotes 64-bit integers in its JSON output, so totals may arrive
/// as numbers or as numeric strings.
fn deserialize_total<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Total {
        Number(f64),
        Text(String),
        Null(()),
    }

    match Total::deserialize(deserializer)? {
        Total::Number(n) => Ok(n),
        Total::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric total: {:?}", s))),
        Total::Null(()) => Ok(0.0),
    }
}
