use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{ChartPoint, ChartView, Metric, MetricsView, QueryRecord, SeriesPoint, Unit};

pub const CHART_COLOR: &str = "#ffb200";

pub const CPU_TOOLTIP: &str =
    "Calculated from OSCPUVirtualTimeMicroseconds metric from ClickHouse query log's ProfileEvents.";

struct ChartSpec {
    metric: Metric,
    title: &'static str,
    unit: Unit,
    tooltip: Option<&'static str>,
    x_tick_count: Option<u32>,
}

const CHARTS: [ChartSpec; 4] = [
    ChartSpec {
        metric: Metric::ExecutionCount,
        title: "Number of queries",
        unit: Unit::Count,
        tooltip: None,
        x_tick_count: Some(5),
    },
    ChartSpec {
        metric: Metric::ReadBytes,
        title: "Data read (GB)",
        unit: Unit::Gigabytes,
        tooltip: None,
        x_tick_count: Some(5),
    },
    ChartSpec {
        metric: Metric::MemoryUsage,
        title: "Memory usage (GB)",
        unit: Unit::Gigabytes,
        tooltip: None,
        x_tick_count: None,
    },
    ChartSpec {
        metric: Metric::Cpu,
        title: "CPU usage (seconds)",
        unit: Unit::Seconds,
        tooltip: Some(CPU_TOOLTIP),
        x_tick_count: None,
    },
];

/// Calendar day of a `day_start` value, `YYYY-MM-DD`.
///
/// Accepts RFC 3339, ClickHouse `DateTime` text and bare dates. Anything else
/// is cut at the first `T` or space.
pub fn day_key(day_start: &str) -> String {
    let trimmed = day_start.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.date_naive().to_string();
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return dt.date().to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.to_string();
    }

    trimmed.split(['T', ' ']).next().unwrap_or_default().to_string()
}

pub fn series(record: &QueryRecord, metric: Metric) -> &[SeriesPoint] {
    match metric {
        Metric::ExecutionCount => &record.execution_count,
        Metric::ReadBytes => &record.read_bytes,
        Metric::MemoryUsage => &record.memory_usage,
        Metric::Cpu => &record.cpu,
    }
}

fn chart(record: &QueryRecord, spec: &ChartSpec) -> ChartView {
    let points = series(record, spec.metric)
        .iter()
        .map(|point| ChartPoint {
            day: day_key(&point.day_start),
            total: spec.unit.convert(point.total),
        })
        .collect();

    ChartView {
        metric: spec.metric,
        title: spec.title.to_string(),
        tooltip: spec.tooltip.map(str::to_string),
        unit: spec.unit,
        color: CHART_COLOR.to_string(),
        x_tick_count: spec.x_tick_count,
        points,
    }
}

/// The four metric charts in display order. Missing series give empty charts.
pub fn metrics_view(record: &QueryRecord) -> MetricsView {
    MetricsView {
        charts: CHARTS.iter().map(|spec| chart(record, spec)).collect(),
    }
}
