// src/utils/seed.rs
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::SparrowResult;
use crate::models::{Ride, Transaction};

/// Externally supplied starting data for a session.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct SeedData {
    #[serde(default)]
    pub rides: Vec<Ride>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl SeedData {
    pub fn from_json(json: &str) -> SparrowResult<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        tracing::debug!(
            "Parsed seed with {} rides and {} transactions",
            seed.rides.len(),
            seed.transactions.len()
        );
        Ok(seed)
    }

    pub fn load(path: impl AsRef<Path>) -> SparrowResult<Self> {
        let path = path.as_ref();
        tracing::info!("Loading seed data from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SparrowError;
    use crate::models::{RideStatus, TransactionStatus};

    const SEED: &str = r#"{
        "rides": [{
            "id": "rid-250901-a1b2c",
            "status": "Completed",
            "passenger_name": "Kofi Mensah",
            "pickup_location": "Accra Mall",
            "dropoff_location": "Labadi Beach",
            "scheduled_date": "2025-09-01",
            "scheduled_time": "14:30:00",
            "fare_amount": "45.50",
            "distance": 12.3
        }],
        "transactions": [{
            "id": "pay-250831-f00aa",
            "amount": "300.00",
            "date": "2025-08-31",
            "status": "Completed"
        }]
    }"#;

    #[test]
    fn test_parses_rides_and_transactions() {
        let seed = SeedData::from_json(SEED).unwrap();
        assert_eq!(seed.rides.len(), 1);
        assert_eq!(seed.rides[0].status, RideStatus::Completed);
        assert_eq!(seed.rides[0].fare_amount.to_string(), "45.50");
        assert_eq!(seed.transactions[0].status, TransactionStatus::Completed);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let seed = SeedData::from_json("{}").unwrap();
        assert!(seed.rides.is_empty());
        assert!(seed.transactions.is_empty());
    }

    #[test]
    fn test_malformed_seed_is_json_error() {
        let err = SeedData::from_json(r#"{"rides": [{"id": 1}]}"#).unwrap_err();
        assert!(matches!(err, SparrowError::JsonParsing(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SeedData::load("/definitely/not/here/seed.json").unwrap_err();
        assert!(matches!(err, SparrowError::Io(_)));
    }
}
