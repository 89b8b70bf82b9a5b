//! Unit tests for the wire and settings models

use super::*;

mod record_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_record_parses() {
        let json = r#"{
            "query": "SELECT * FROM events WHERE team_id = ?",
            "execution_count": [{"day_start": "2024-01-01T00:00:00Z", "total": 12}],
            "read_bytes": [{"day_start": "2024-01-01T00:00:00Z", "total": 5000000000}],
            "memory_usage": [{"day_start": "2024-01-01T00:00:00Z", "total": 1500000000}],
            "cpu": [{"day_start": "2024-01-01T00:00:00Z", "total": 3.5}],
            "explain": [{"explain": "Expression"}, {"explain": "  ReadFromMergeTree"}],
            "example_queries": [{"query": "SELECT * FROM events WHERE team_id = 2"}]
        }"#;

        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.query_text(), "SELECT * FROM events WHERE team_id = ?");
        assert_eq!(record.execution_count[0].total, 12.0);
        assert_eq!(record.read_bytes[0].total, 5_000_000_000.0);
        assert_eq!(record.cpu[0].total, 3.5);
        assert_eq!(record.explain_text(), "Expression\n  ReadFromMergeTree");
        assert_eq!(record.example_queries.len(), 1);
        assert!(record.is_loaded());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: QueryRecord = serde_json::from_str(r#"{"query": "SELECT 1"}"#).unwrap();
        assert!(record.execution_count.is_empty());
        assert!(record.read_bytes.is_empty());
        assert!(record.memory_usage.is_empty());
        assert!(record.cpu.is_empty());
        assert!(record.explain.is_empty());
        assert!(record.example_queries.is_empty());
        assert_eq!(record.explain_text(), "");
    }

    #[test]
    fn test_null_lists_are_empty() {
        let record: QueryRecord =
            serde_json::from_str(r#"{"query": "SELECT 1", "explain": null, "cpu": null}"#).unwrap();
        assert!(record.explain.is_empty());
        assert!(record.cpu.is_empty());
    }

    #[test]
    fn test_record_without_query_is_not_loaded() {
        let record: QueryRecord = serde_json::from_str("{}").unwrap();
        assert!(!record.is_loaded());

        let record: QueryRecord = serde_json::from_str(r#"{"query": ""}"#).unwrap();
        assert!(!record.is_loaded());
    }

    #[test]
    fn test_quoted_totals_are_numbers() {
        let json = r#"{"read_bytes": [{"day_start": "2024-01-01 00:00:00", "total": "18446744073"}]}"#;
        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.read_bytes[0].total, 18_446_744_073.0);
    }

    #[test]
    fn test_null_total_is_zero() {
        let json = r#"{"cpu": [{"day_start": "2024-01-01", "total": null}]}"#;
        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.cpu[0].total, 0.0);
    }

    #[test]
    fn test_non_numeric_total_is_rejected() {
        let json = r#"{"cpu": [{"day_start": "2024-01-01", "total": "lots"}]}"#;
        assert!(serde_json::from_str::<QueryRecord>(json).is_err());
    }

    #[test]
    fn test_incomplete_rows_degrade_to_empty_text() {
        let json = r#"{
            "query": "SELECT 1",
            "cpu": [{"total": 2}, {"day_start": null, "total": 3}],
            "explain": [{"explain": null}, {}, {"explain": "Expression"}],
            "example_queries": [{"query": null}]
        }"#;

        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_loaded());
        assert_eq!(record.cpu[0].day_start, "");
        assert_eq!(record.cpu[1].day_start, "");
        assert_eq!(record.cpu[1].total, 3.0);
        assert_eq!(record.explain_text(), "\n\nExpression");
        assert_eq!(record.example_queries[0].query, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"query": "SELECT 1", "normalized_query_hash": "123", "extra": {"a": 1}}"#;
        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.query_text(), "SELECT 1");
    }
}

mod settings_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = ViewSettings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8000");
        assert_eq!(settings.back_href, "/slow_queries/");
        assert_eq!(settings.poll.interval_ms, 5000);
        assert_eq!(settings.poll.request_timeout_ms, 30_000);
        assert_eq!(settings.notice.copied_ms, 1000);
        assert_eq!(settings.format.indent_width, 2);
        assert_eq!(settings.format.uppercase_keywords, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            ViewSettings::from_json(r#"{"apiBaseUrl": "https://housewatch.internal", "poll": {"intervalMs": 10000}}"#)
                .unwrap();
        assert_eq!(settings.api_base_url, "https://housewatch.internal");
        assert_eq!(settings.poll.interval_ms, 10_000);
        assert_eq!(settings.poll.request_timeout_ms, 30_000);
        assert_eq!(settings.notice, NoticeSettings::default());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = ViewSettings::from_json(r#"{"poll": {"intervalMs": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("poll interval"));
    }

    #[test]
    fn test_malformed_settings_are_rejected() {
        assert!(ViewSettings::from_json("{not json").is_err());
    }

    #[test]
    fn test_settings_round_trip_uses_camel_case() {
        let json = serde_json::to_string(&ViewSettings::default()).unwrap();
        assert!(json.contains("\"apiBaseUrl\""));
        assert!(json.contains("\"requestTimeoutMs\":30000"));
    }
}

mod tab_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_tab_is_query() {
        assert_eq!(Tab::default(), Tab::Query);
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("metrics".parse::<Tab>().unwrap(), Tab::Metrics);
        assert_eq!("EXPLAIN".parse::<Tab>().unwrap(), Tab::Explain);
        assert!("plan".parse::<Tab>().is_err());
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<&str> = Tab::ALL.iter().map(|tab| tab.label()).collect();
        assert_eq!(labels, vec!["Query", "Metrics", "EXPLAIN", "Example queries"]);
    }

    #[test]
    fn test_gigabyte_conversion() {
        assert_eq!(Unit::Gigabytes.convert(5_000_000_000.0), 5.0);
        assert_eq!(Unit::Count.convert(42.0), 42.0);
        assert_eq!(Unit::Seconds.convert(1.25), 1.25);
    }
}
