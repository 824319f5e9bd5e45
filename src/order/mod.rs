//! Direction-based ordering of merged datasets.
//!
//! The sort must be stable: the merger places surviving secondary records in
//! front of the reference block, and records with equal keys at that boundary
//! must keep their relative order instead of being shuffled arbitrarily.

use crate::domain::{Dataset, Direction};
use crate::error::AppError;

/// Return a new dataset sorted by the numeric `key` column in the given
/// direction. Records with equal keys retain their input order.
pub fn order_by_key(
    dataset: &Dataset,
    key: &str,
    direction: Direction,
) -> Result<Dataset, AppError> {
    let keys = dataset.numeric_column(key)?;

    let mut indices: Vec<usize> = (0..keys.len()).collect();
    // `sort_by` is stable, so reversing the comparison (rather than the
    // output) keeps equal-key records in input order for both directions.
    match direction {
        Direction::Ascending => indices.sort_by(|&a, &b| keys[a].total_cmp(&keys[b])),
        Direction::Descending => indices.sort_by(|&a, &b| keys[b].total_cmp(&keys[a])),
    }

    let records = indices
        .into_iter()
        .map(|i| dataset.records()[i].clone())
        .collect();

    Ok(Dataset::new(dataset.columns().to_vec(), records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, Record};

    fn dataset(rows: &[(f64, f64)]) -> Dataset {
        Dataset::new(
            vec!["SOC".to_string(), "Voltage".to_string()],
            rows.iter()
                .map(|&(s, v)| {
                    Record::new(vec![FieldValue::Number(s), FieldValue::Number(v)])
                })
                .collect(),
        )
    }

    fn pairs(ds: &Dataset) -> Vec<(f64, f64)> {
        let soc = ds.numeric_column("SOC").unwrap();
        let v = ds.numeric_column("Voltage").unwrap();
        soc.into_iter().zip(v).collect()
    }

    #[test]
    fn ascending_orders_merged_scenario() {
        let merged = dataset(&[(10.0, 2.5), (90.0, 4.2), (20.0, 3.0), (80.0, 4.0)]);
        let ordered = order_by_key(&merged, "SOC", Direction::Ascending).unwrap();
        assert_eq!(
            pairs(&ordered),
            vec![(10.0, 2.5), (20.0, 3.0), (80.0, 4.0), (90.0, 4.2)]
        );
    }

    #[test]
    fn descending_is_the_reverse_of_ascending_for_distinct_keys() {
        let merged = dataset(&[(10.0, 2.5), (90.0, 4.2), (20.0, 3.0), (80.0, 4.0)]);
        let ordered = order_by_key(&merged, "SOC", Direction::Descending).unwrap();
        assert_eq!(
            pairs(&ordered),
            vec![(90.0, 4.2), (80.0, 4.0), (20.0, 3.0), (10.0, 2.5)]
        );
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        // Voltage distinguishes the two SOC=50 records.
        let merged = dataset(&[(50.0, 1.0), (20.0, 2.0), (50.0, 3.0), (80.0, 4.0)]);

        let asc = order_by_key(&merged, "SOC", Direction::Ascending).unwrap();
        assert_eq!(
            pairs(&asc),
            vec![(20.0, 2.0), (50.0, 1.0), (50.0, 3.0), (80.0, 4.0)]
        );

        let desc = order_by_key(&merged, "SOC", Direction::Descending).unwrap();
        assert_eq!(
            pairs(&desc),
            vec![(80.0, 4.0), (50.0, 1.0), (50.0, 3.0), (20.0, 2.0)]
        );
    }

    #[test]
    fn non_numeric_key_is_a_schema_error() {
        let ds = Dataset::new(
            vec!["SOC".to_string()],
            vec![Record::new(vec![FieldValue::Text("low".to_string())])],
        );
        let err = order_by_key(&ds, "SOC", Direction::Ascending).unwrap_err();
        assert!(matches!(err, AppError::Schema { .. }));
    }

    #[test]
    fn input_dataset_is_left_untouched() {
        let merged = dataset(&[(90.0, 4.2), (10.0, 2.5)]);
        let _ = order_by_key(&merged, "SOC", Direction::Ascending).unwrap();
        assert_eq!(pairs(&merged), vec![(90.0, 4.2), (10.0, 2.5)]);
    }
}
