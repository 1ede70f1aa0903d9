//! Integration tests for Strata.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use strata::summary::format_median_iqr;
use strata::{
    MANIFEST_FILE, Parser, ReportConfig, Reporter, RowKind, RowTable, StrataError, TableFormat,
    VariableSpec, build_table, default_variables,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const HEADER: &str = "customer_id,signup_date,region,plan_type,tenure_months,monthly_fee_gbp,\
                      support_tickets_90d,last_login_days,nps_score,churned_90d";

fn plan_for(i: usize) -> &'static str {
    match i {
        0..30 => "Basic",
        30..60 => "Standard",
        _ => "Premium",
    }
}

fn nps_for(i: usize) -> Option<usize> {
    if i % 10 == 3 { None } else { Some(i % 11) }
}

/// 100 customers: 30 Basic, 30 Standard, 40 Premium; NPS missing in 10 rows.
fn customer_csv(with_extras: bool) -> String {
    let mut out = String::from(HEADER);
    if with_extras {
        out.push_str(",marketing_channel,device_type,revenue_last_3m_gbp");
    }
    out.push('\n');

    for i in 0..100 {
        let plan = plan_for(i);
        let fee = match plan {
            "Basic" => "9.99",
            "Standard" => "14.99",
            _ => "24.99",
        };
        let region = ["North", "South", "East", "West"][i % 4];
        let nps = nps_for(i).map(|v| v.to_string()).unwrap_or_else(|| "NA".into());
        let churned = if i % 4 == 0 { 1 } else { 0 };
        out.push_str(&format!(
            "C{:04},2023-{:02}-{:02},{},{},{},{},{},{},{},{}",
            i,
            i % 12 + 1,
            i % 28 + 1,
            region,
            plan,
            i % 36 + 1,
            fee,
            i % 5,
            (i * 7) % 60,
            nps,
            churned
        ));
        if with_extras {
            out.push_str(&format!(",email,{},{}", ["ios", "android"][i % 2], i * 3));
        }
        out.push('\n');
    }
    out
}

fn run_report(content: &str) -> RowTable {
    let file = create_test_file(content);
    Reporter::new()
        .run(file.path())
        .expect("Report failed")
        .table
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn test_end_to_end_scenario() {
    let table = run_report(&customer_csv(false));

    let groups: Vec<_> = table.groups.iter().map(|g| g.header()).collect();
    assert_eq!(
        groups,
        vec![
            "Basic, N = 30",
            "Standard, N = 30",
            "Premium, N = 40",
            "Overall, N = 100"
        ]
    );

    let missing = table.row("NPS Score (Missing)").expect("missing row");
    assert_eq!(missing.kind, RowKind::Missing);
    assert_eq!(missing.values, vec!["3 (10%)", "3 (10%)", "4 (10%)", "10 (10%)"]);

    let observed: Vec<f64> = (0..100).filter_map(nps_for).map(|v| v as f64).collect();
    assert_eq!(observed.len(), 90);
    assert_eq!(
        table.value("NPS Score, median (IQR)", "Overall"),
        Some(format_median_iqr(&observed).as_str())
    );

    assert_eq!(
        table.row("Churned within 90 days, n (%)").unwrap().values,
        vec!["8 (27%)", "7 (23%)", "10 (25%)", "25 (25%)"]
    );
}

#[test]
fn test_rows_follow_variable_order() {
    let table = run_report(&customer_csv(false));
    let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();

    assert_eq!(
        labels,
        vec![
            "Region, n (%)",
            "- East",
            "- North",
            "- South",
            "- West",
            "Tenure (months), median (IQR)",
            "Monthly fee (GBP), median (IQR)",
            "Support tickets (90 days), median (IQR)",
            "Days since last login, median (IQR)",
            "NPS Score, median (IQR)",
            "NPS Score (Missing)",
            "Churned within 90 days, n (%)",
        ]
    );
}

#[test]
fn test_categorical_counts_sum_to_non_missing() {
    let table = run_report(&customer_csv(false));

    for (index, group) in table.groups.iter().enumerate() {
        let total: usize = table
            .rows
            .iter()
            .filter(|r| r.kind == RowKind::Level)
            .map(|r| {
                r.values[index]
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .expect("count")
            })
            .sum();
        assert_eq!(total, group.n, "region counts for {}", group.name);
    }
}

// =============================================================================
// Determinism and Compatibility
// =============================================================================

#[test]
fn test_builder_is_idempotent() {
    let table = Parser::new()
        .parse_bytes(customer_csv(false).as_bytes())
        .expect("Parse failed");
    let reporter = Reporter::new();
    let dataset = reporter.load_table(&table).expect("Validation failed");

    let first = reporter.table(&dataset).expect("Build failed");
    let second = reporter.table(&dataset).expect("Build failed");
    assert_eq!(first, second);
}

#[test]
fn test_extra_columns_do_not_change_output() {
    let plain = run_report(&customer_csv(false));
    let extended = run_report(&customer_csv(true));
    assert_eq!(plain, extended);
}

#[test]
fn test_no_missing_rows_without_missing_values() {
    let content = format!(
        "{}\n\
         C1,2024-01-01,North,Basic,3,9.99,0,2,9,0\n\
         C2,2024-01-02,South,Premium,12,24.99,1,5,7,1\n",
        HEADER
    );
    let table = run_report(&content);
    assert!(table.rows.iter().all(|r| r.kind != RowKind::Missing));
}

// =============================================================================
// Groups
// =============================================================================

#[test]
fn test_empty_tier_is_kept() {
    let content = format!(
        "{}\n\
         C1,2024-01-01,North,Basic,3,9.99,0,2,9,0\n\
         C2,2024-01-02,South,Premium,12,24.99,1,5,7,1\n",
        HEADER
    );
    let table = run_report(&content);

    assert_eq!(table.group("Standard").map(|g| g.n), Some(0));
    assert_eq!(table.value("NPS Score, median (IQR)", "Standard"), Some("-"));
    assert_eq!(table.value("- North", "Standard"), Some("0 (0%)"));
    assert_eq!(
        table.value("Churned within 90 days, n (%)", "Standard"),
        Some("0 (0%)")
    );
}

#[test]
fn test_unknown_tier_counts_only_in_overall() {
    let content = format!(
        "{}\n\
         C1,2024-01-01,North,Basic,3,9.99,0,2,9,0\n\
         C2,2024-01-02,South,Enterprise,12,99.99,1,5,7,1\n\
         C3,2024-01-03,South,NA,4,9.99,0,1,6,0\n",
        HEADER
    );
    let table = run_report(&content);

    let sizes: Vec<_> = table.groups.iter().map(|g| g.n).collect();
    assert_eq!(sizes, vec![1, 0, 0, 3]);
    assert_eq!(table.value("- South", "Overall"), Some("2 (67%)"));
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn test_missing_core_column_is_configuration_error() {
    let content = "customer_id,plan_type\nC1,Basic\n";
    let file = create_test_file(content);

    let err = Reporter::new().run(file.path()).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(matches!(err, StrataError::MissingColumn { .. }));
}

#[test]
fn test_type_mismatch_is_configuration_error() {
    let content = format!("{}\nC1,2024-01-01,North,Basic,three,9.99,0,2,9,0\n", HEADER);
    let file = create_test_file(&content);

    let err = Reporter::new().run(file.path()).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("tenure_months"));
}

#[test]
fn test_unknown_variable_is_configuration_error() {
    let table = Parser::new()
        .parse_bytes(customer_csv(false).as_bytes())
        .expect("Parse failed");
    let dataset = Reporter::new().load_table(&table).expect("Validation failed");

    let mut variables = default_variables();
    variables.push(VariableSpec::continuous("Revenue", "revenue_last_3m_gbp"));
    let err = build_table(&dataset, "plan_type", "Overall", &variables).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Reporter::new().run("does/not/exist.csv").unwrap_err();
    assert!(matches!(err, StrataError::Io { .. }));
}

// =============================================================================
// Configuration and Output
// =============================================================================

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = dir.path().join("strata.json");
    fs::write(
        &config_path,
        r#"{
            "overall_label": "All customers",
            "variables": [
                {"kind": "continuous", "label": "NPS", "column": "nps_score"}
            ]
        }"#,
    )
    .expect("Failed to write config");

    let config = ReportConfig::load(&config_path).expect("Config failed");
    assert_eq!(config.group_column, "plan_type");

    let file = create_test_file(&customer_csv(false));
    let table = Reporter::with_config(config)
        .run(file.path())
        .expect("Report failed")
        .table;

    assert_eq!(table.groups.last().map(|g| g.name.as_str()), Some("All customers"));
    let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["NPS, median (IQR)", "NPS (Missing)"]);
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("strata.json");

    let config = ReportConfig::default();
    config.save(&path).expect("Save failed");
    let loaded = ReportConfig::load(&path).expect("Load failed");

    assert_eq!(loaded.variables, config.variables);
    assert_eq!(loaded.schema, config.schema);
}

#[test]
fn test_write_report_outputs() {
    let file = create_test_file(&customer_csv(false));
    let report = Reporter::new().run(file.path()).expect("Report failed");

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out_dir = dir.path().join("output");
    let written = report
        .write_to(&out_dir, &TableFormat::ALL)
        .expect("Write failed");

    assert_eq!(written.len(), 9);
    for path in &written {
        assert!(path.exists(), "{} not written", path.display());
    }

    let text = fs::read_to_string(out_dir.join("summary_table.txt")).unwrap();
    assert!(text.starts_with("Characteristic"));
    assert!(text.contains("NPS Score (Missing)"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(manifest["source"]["row_count"], 100);
    assert!(manifest["source"]["hash"].as_str().unwrap().starts_with("sha256:"));
    assert_eq!(manifest["outputs"].as_array().unwrap().len(), 8);
}

#[test]
fn test_charts_exclude_missing_scores() {
    let file = create_test_file(&customer_csv(false));
    let report = Reporter::new().run(file.path()).expect("Report failed");

    let boxplot = &report.charts.boxplot;
    let sizes: Vec<_> = boxplot.series.iter().map(|s| (s.group.as_str(), s.n)).collect();
    assert_eq!(sizes, vec![("Basic", 27), ("Standard", 27), ("Premium", 36)]);

    let bars = &report.charts.proportions.bars;
    assert_eq!(bars.len(), 3);
    for bar in bars {
        let total: f64 = bar.segments.iter().map(|s| s.proportion).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
    assert_eq!(bars[2].proportion("Yes"), Some(0.25));
}
