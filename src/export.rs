//! CSV export of the metric charts
//!
//! Series are joined on their day key. A day missing from one series leaves
//! that cell blank rather than zero.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{Metric, MetricsView};

const COLUMNS: [(Metric, &str); 4] = [
    (Metric::ExecutionCount, "execution_count"),
    (Metric::ReadBytes, "read_gb"),
    (Metric::MemoryUsage, "memory_gb"),
    (Metric::Cpu, "cpu_seconds"),
];

/// Render the charts as one CSV row per day, days ascending
pub fn metrics_to_csv(view: &MetricsView) -> Result<String> {
    let mut days: BTreeMap<&str, [Option<f64>; 4]> = BTreeMap::new();
    for (column, (metric, _)) in COLUMNS.iter().enumerate() {
        let Some(chart) = view.chart(*metric) else {
            continue;
        };
        for point in &chart.points {
            days.entry(point.day.as_str()).or_default()[column] = Some(point.total);
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["day"];
    header.extend(COLUMNS.iter().map(|(_, name)| *name));
    writer.write_record(&header)?;

    for (day, values) in &days {
        let mut record = vec![day.to_string()];
        record.extend(
            values
                .iter()
                .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}
