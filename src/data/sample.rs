//! Synthetic charge-curve sample generation.
//!
//! Produces a pair of CSV-shaped datasets that exercise the whole pipeline:
//! a reference sweep over the mid-SOC band with canonical headers, and a
//! coarser full-range secondary sweep with alias headers and a text column.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Dataset, FieldValue, Record};
use crate::error::AppError;

/// Quadratic baseline for a nominal Li-ion charge curve:
/// voltage(soc) = 3.0 + 0.012*soc - 2.0e-5*soc^2
/// (3.0 V at 0% SOC, 4.0 V at 100% SOC, slightly concave).
const BASELINE: [f64; 3] = [3.0, 0.012, -2.0e-5];

/// SOC band covered by the reference sweep. The secondary sweep covers the
/// full 0-100% range, so its records inside this band overlap the reference.
const REFERENCE_SOC_MIN: f64 = 20.0;
const REFERENCE_SOC_MAX: f64 = 80.0;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    pub reference_count: usize,
    pub secondary_count: usize,
    pub noise: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reference_count: 61,
            secondary_count: 21,
            noise: 0.005,
        }
    }
}

/// Generate a (reference, secondary) dataset pair from a seeded RNG.
/// The same config always produces the same pair.
pub fn generate_sample_pair(config: &SampleConfig) -> Result<(Dataset, Dataset), AppError> {
    if config.reference_count < 2 || config.secondary_count < 2 {
        return Err(AppError::io(
            "Sample counts must be at least 2 per dataset.".to_string(),
        ));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::io(
            "Sample noise must be finite and non-negative.".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::io(format!("Noise distribution error: {e}")))?;

    let reference = sweep(
        &mut rng,
        &normal,
        config.noise,
        REFERENCE_SOC_MIN,
        REFERENCE_SOC_MAX,
        config.reference_count,
        vec!["SOC".to_string(), "Voltage".to_string()],
        None,
    );
    let secondary = sweep(
        &mut rng,
        &normal,
        config.noise,
        0.0,
        100.0,
        config.secondary_count,
        // Alias headers to exercise column resolution downstream.
        vec!["SoC".to_string(), "Volts".to_string(), "source".to_string()],
        Some("coarse"),
    );

    Ok((reference, secondary))
}

pub fn baseline_voltage(soc: f64) -> f64 {
    BASELINE[0] + soc * (BASELINE[1] + soc * BASELINE[2])
}

fn sweep(
    rng: &mut StdRng,
    normal: &Normal<f64>,
    noise: f64,
    soc_min: f64,
    soc_max: f64,
    count: usize,
    columns: Vec<String>,
    tag: Option<&str>,
) -> Dataset {
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let u = i as f64 / (count as f64 - 1.0);
        let soc = soc_min + u * (soc_max - soc_min);
        let voltage = baseline_voltage(soc) + noise * normal.sample(rng);

        let mut values = vec![FieldValue::Number(soc), FieldValue::Number(voltage)];
        if let Some(tag) = tag {
            values.push(FieldValue::Text(tag.to_string()));
        }
        records.push(Record { values });
    }
    Dataset::new(columns, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_hits_anchor_voltages() {
        assert!((baseline_voltage(0.0) - 3.0).abs() < 1e-12);
        assert!((baseline_voltage(100.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let config = SampleConfig::default();
        let (ref_a, sec_a) = generate_sample_pair(&config).unwrap();
        let (ref_b, sec_b) = generate_sample_pair(&config).unwrap();
        assert_eq!(ref_a, ref_b);
        assert_eq!(sec_a, sec_b);
    }

    #[test]
    fn secondary_uses_alias_headers() {
        let (reference, secondary) = generate_sample_pair(&SampleConfig::default()).unwrap();
        assert_eq!(reference.columns(), &["SOC", "Voltage"]);
        assert_eq!(secondary.columns(), &["SoC", "Volts", "source"]);
        assert_eq!(reference.len(), 61);
        assert_eq!(secondary.len(), 21);
    }

    #[test]
    fn zero_noise_lies_on_baseline() {
        let config = SampleConfig {
            noise: 0.0,
            ..SampleConfig::default()
        };
        let (reference, _) = generate_sample_pair(&config).unwrap();
        let soc = reference.numeric_column("SOC").unwrap();
        let voltage = reference.numeric_column("Voltage").unwrap();
        for (s, v) in soc.iter().zip(voltage.iter()) {
            assert!((v - baseline_voltage(*s)).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_bad_config() {
        let too_few = SampleConfig {
            reference_count: 1,
            ..SampleConfig::default()
        };
        assert!(generate_sample_pair(&too_few).is_err());

        let bad_noise = SampleConfig {
            noise: f64::NAN,
            ..SampleConfig::default()
        };
        assert!(generate_sample_pair(&bad_noise).is_err());
    }
}
