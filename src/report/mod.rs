//! Reporting utilities: dataset stats and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the merge/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Dataset, DatasetStats, Direction, TrendModel, SOC, VOLTAGE};
use crate::error::AppError;
use crate::merge::MergeOutcome;

/// Compute summary stats for a dataset with resolved SOC/Voltage columns.
pub fn dataset_stats(dataset: &Dataset) -> Result<DatasetStats, AppError> {
    let soc = dataset.numeric_column(SOC)?;
    let voltage = dataset.numeric_column(VOLTAGE)?;

    let mut soc_min = f64::INFINITY;
    let mut soc_max = f64::NEG_INFINITY;
    for &s in &soc {
        soc_min = soc_min.min(s);
        soc_max = soc_max.max(s);
    }
    let mut voltage_min = f64::INFINITY;
    let mut voltage_max = f64::NEG_INFINITY;
    for &v in &voltage {
        voltage_min = voltage_min.min(v);
        voltage_max = voltage_max.max(v);
    }

    Ok(DatasetStats {
        rows: dataset.len(),
        columns: dataset.columns().len(),
        soc_min,
        soc_max,
        voltage_min,
        voltage_max,
    })
}

/// Format the full run summary (dataset stats + merge details + trend coefficients).
pub fn format_run_summary(
    direction: Direction,
    reference: &DatasetStats,
    secondary: &DatasetStats,
    merged: &DatasetStats,
    merge: &MergeOutcome,
    trend: &TrendModel,
) -> String {
    let mut out = String::new();

    out.push_str("=== soc - Charge Curve Analysis ===\n");
    out.push_str(&format!("Direction: {}\n", direction.display_name()));
    out.push_str(&format_stats_line("Reference", reference));
    out.push_str(&format_stats_line("Secondary", secondary));

    out.push_str("\nMerge:\n");
    out.push_str(&format!(
        "- overlap window: SOC=[{:.3}, {:.3}]\n",
        merge.lo, merge.hi
    ));
    out.push_str(&format!(
        "- secondary records: {} kept, {} dropped\n",
        merge.kept_secondary, merge.dropped
    ));
    out.push_str(&format_stats_line("Merged", merged));

    out.push_str("\nTrend (voltage = c0 + c1*SOC + c2*SOC^2):\n");
    out.push_str(&format!(
        "- coefficients: {}\n",
        fmt_vec(&trend.coefficients)
    ));
    out.push('\n');

    out
}

fn format_stats_line(label: &str, stats: &DatasetStats) -> String {
    format!(
        "{label}: rows={} cols={} | SOC=[{:.3}, {:.3}] | voltage=[{:.3}, {:.3}]\n",
        stats.rows, stats.columns, stats.soc_min, stats.soc_max, stats.voltage_min, stats.voltage_max
    )
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, Record};

    fn dataset(rows: &[(f64, f64)]) -> Dataset {
        Dataset::new(
            vec![SOC.to_string(), VOLTAGE.to_string()],
            rows.iter()
                .map(|&(s, v)| Record {
                    values: vec![FieldValue::Number(s), FieldValue::Number(v)],
                })
                .collect(),
        )
    }

    #[test]
    fn dataset_stats_basic() {
        let stats = dataset_stats(&dataset(&[(10.0, 2.5), (90.0, 4.1), (50.0, 3.3)])).unwrap();
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.columns, 2);
        assert_eq!(stats.soc_min, 10.0);
        assert_eq!(stats.soc_max, 90.0);
        assert_eq!(stats.voltage_min, 2.5);
        assert_eq!(stats.voltage_max, 4.1);
    }

    #[test]
    fn dataset_stats_missing_column_is_schema_error() {
        let bare = Dataset::new(
            vec!["other".to_string()],
            vec![Record {
                values: vec![FieldValue::Number(1.0)],
            }],
        );
        assert!(dataset_stats(&bare).is_err());
    }

    #[test]
    fn run_summary_contains_key_sections() {
        let reference = dataset(&[(20.0, 3.0), (80.0, 4.0)]);
        let secondary = dataset(&[(10.0, 2.5), (50.0, 3.5), (90.0, 4.2)]);
        let merge =
            crate::merge::merge_with_overlap_removal(&reference, &secondary, SOC).unwrap();

        let summary = format_run_summary(
            Direction::Ascending,
            &dataset_stats(&reference).unwrap(),
            &dataset_stats(&secondary).unwrap(),
            &dataset_stats(&merge.merged).unwrap(),
            &merge,
            &TrendModel {
                coefficients: [3.0, 0.01, 0.0],
            },
        );

        assert!(summary.contains("=== soc - Charge Curve Analysis ==="));
        assert!(summary.contains("charging (ascending SOC)"));
        assert!(summary.contains("overlap window: SOC=[20.000, 80.000]"));
        assert!(summary.contains("2 kept, 1 dropped"));
        assert!(summary.contains("coefficients: [3.000000, 0.010000, 0.000000]"));
    }
}
