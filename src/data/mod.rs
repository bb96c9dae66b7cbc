//! Read-only access to the forecast dataset.

use regex::Regex;
use std::path::Path;

use crate::types::PriceRecord;
use crate::{AppError, Result};

const SAMPLE_DATASET: &str = include_str!("sample_prices.json");

pub trait PriceRepository: Send + Sync {
    fn all(&self) -> &[PriceRecord];

    /// Unique product names, in first-seen order.
    fn products(&self) -> Vec<String> {
        unique(self.all().iter().map(|r| r.product.as_str()))
    }

    /// Unique state codes, in first-seen order.
    fn states(&self) -> Vec<String> {
        unique(self.all().iter().map(|r| r.state.as_str()))
    }

    /// Records matching both criteria. A missing or empty criterion matches everything.
    fn filter(&self, product: Option<&str>, state: Option<&str>) -> Vec<PriceRecord> {
        let product = product.filter(|p| !p.is_empty());
        let state = state.filter(|s| !s.is_empty());

        self.all()
            .iter()
            .filter(|r| product.map_or(true, |p| r.product == p))
            .filter(|r| state.map_or(true, |s| r.state == s))
            .cloned()
            .collect()
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

pub struct InMemoryRepository {
    records: Vec<PriceRecord>,
}

impl InMemoryRepository {
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_DATASET)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read dataset {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<PriceRecord> = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("Failed to parse dataset: {}", e)))?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<PriceRecord>) -> Result<Self> {
        let state_code = Regex::new(r"^[A-Z]{2}$")
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid state pattern: {}", e)))?;

        for record in &records {
            validate(record, &state_code)?;
        }

        tracing::debug!("Loaded {} price records", records.len());
        Ok(Self { records })
    }
}

fn validate(record: &PriceRecord, state_code: &Regex) -> Result<()> {
    let label = record.label();

    if !state_code.is_match(&record.state) {
        return Err(AppError::Config(format!(
            "{}: state must be a two-letter code",
            label
        )));
    }

    let range = record.forecast_range_june;
    if range.min.is_nan() || range.max.is_nan() || range.min > range.max {
        return Err(AppError::Config(format!(
            "{}: forecast range [{}, {}] is not a valid range",
            label, range.min, range.max
        )));
    }

    if !(0.0..=100.0).contains(&record.model_accuracy_percent) {
        return Err(AppError::Config(format!(
            "{}: model accuracy {} is outside [0, 100]",
            label, record.model_accuracy_percent
        )));
    }

    Ok(())
}

impl PriceRepository for InMemoryRepository {
    fn all(&self) -> &[PriceRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    #[test]
    fn bundled_dataset_loads() {
        let repo = InMemoryRepository::sample().unwrap();

        assert_eq!(repo.all().len(), 5);
        assert_eq!(
            repo.products(),
            vec!["ABACAXI", "BANANA", "CAFE", "SOJA", "MILHO"]
        );
        assert_eq!(repo.states(), vec!["PR", "SP", "MG", "MT", "RS"]);
    }

    #[test]
    fn filter_combines_criteria() {
        let repo = InMemoryRepository::from_records(vec![
            record("SOJA", "MT", [Some(1.0); 5], 1.0, (0.5, 1.5)),
            record("SOJA", "PR", [Some(1.0); 5], 1.0, (0.5, 1.5)),
            record("MILHO", "PR", [Some(1.0); 5], 1.0, (0.5, 1.5)),
        ])
        .unwrap();

        assert_eq!(repo.filter(None, None).len(), 3);
        assert_eq!(repo.filter(Some(""), Some("")).len(), 3);
        assert_eq!(repo.filter(Some("SOJA"), None).len(), 2);
        assert_eq!(repo.filter(None, Some("PR")).len(), 2);

        let hits = repo.filter(Some("SOJA"), Some("PR"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label(), "SOJA (PR)");

        assert!(repo.filter(Some("CAFE"), None).is_empty());
        // filtering never alters the source
        assert_eq!(repo.all().len(), 3);
    }

    #[test]
    fn rejects_inverted_forecast_range() {
        let bad = record("SOJA", "MT", [Some(1.0); 5], 1.0, (2.0, 1.0));
        let err = InMemoryRepository::from_records(vec![bad]).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn rejects_nan_forecast_bounds() {
        let bad_min = record("SOJA", "MT", [Some(1.0); 5], 1.0, (f64::NAN, 2.0));
        let bad_max = record("SOJA", "MT", [Some(1.0); 5], 1.0, (1.0, f64::NAN));

        for bad in [bad_min, bad_max] {
            let err = InMemoryRepository::from_records(vec![bad]).err().unwrap();
            assert!(matches!(err, AppError::Config(_)));
        }
    }

    #[test]
    fn rejects_accuracy_out_of_bounds() {
        let mut bad = record("SOJA", "MT", [Some(1.0); 5], 1.0, (1.0, 2.0));
        bad.model_accuracy_percent = 101.0;
        assert!(InMemoryRepository::from_records(vec![bad]).is_err());
    }

    #[test]
    fn rejects_malformed_state_code() {
        let bad = record("SOJA", "mato grosso", [Some(1.0); 5], 1.0, (1.0, 2.0));
        assert!(InMemoryRepository::from_records(vec![bad]).is_err());
    }

    #[test]
    fn missing_dataset_file_is_a_config_error() {
        let err = InMemoryRepository::from_path("/nonexistent/prices.json").err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
