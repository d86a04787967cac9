// src/models/ride.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SparrowError, SparrowResult, ValidationError};

pub type RideId = String;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RideStatus {
    Upcoming,  // Scheduled, not yet driven
    Completed, // Driven and paid
    Cancelled, // Called off; kept for history
}

impl RideStatus {
    /// Completed and Cancelled rides never move again.
    pub fn is_terminal(self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }

    pub fn can_transition_to(self, target: RideStatus) -> bool {
        self == RideStatus::Upcoming && target.is_terminal()
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideStatus::Upcoming => write!(f, "Upcoming"),
            RideStatus::Completed => write!(f, "Completed"),
            RideStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// The two lists the rides screen can show.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RideFilter {
    Upcoming,
    Completed,
}

impl From<RideFilter> for RideStatus {
    fn from(filter: RideFilter) -> Self {
        match filter {
            RideFilter::Upcoming => RideStatus::Upcoming,
            RideFilter::Completed => RideStatus::Completed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ride {
    pub id: RideId,
    pub status: RideStatus,
    pub passenger_name: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub fare_amount: Decimal,
    pub distance: Decimal, // Kilometres
}

// Request Models
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RideInput {
    #[serde(default)]
    pub id: Option<RideId>, // Generated when absent
    pub passenger_name: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub fare_amount: Decimal,
    pub distance: Decimal,
}

impl RideInput {
    /// Collects every field problem instead of stopping at the first one.
    pub fn validate(&self) -> SparrowResult<()> {
        let mut errors = Vec::new();

        if self.fare_amount < Decimal::ZERO {
            errors.push(ValidationError {
                field: "fare_amount".to_string(),
                message: "Fare amount must not be negative".to_string(),
            });
        }
        if self.distance < Decimal::ZERO {
            errors.push(ValidationError {
                field: "distance".to_string(),
                message: "Distance must not be negative".to_string(),
            });
        }
        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                errors.push(ValidationError {
                    field: "id".to_string(),
                    message: "Ride ID must not be blank".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SparrowError::ValidationFailed(errors))
        }
    }

    pub fn into_ride(self, id: RideId, status: RideStatus) -> Ride {
        Ride {
            id,
            status,
            passenger_name: self.passenger_name,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            fare_amount: self.fare_amount,
            distance: self.distance,
        }
    }
}

impl From<Ride> for RideInput {
    fn from(ride: Ride) -> Self {
        Self {
            id: Some(ride.id),
            passenger_name: ride.passenger_name,
            pickup_location: ride.pickup_location,
            dropoff_location: ride.dropoff_location,
            scheduled_date: ride.scheduled_date,
            scheduled_time: ride.scheduled_time,
            fare_amount: ride.fare_amount,
            distance: ride.distance,
        }
    }
}

/// Appended by the ledger whenever a ride reaches Completed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompletionRecord {
    pub ride_id: RideId,
    pub ride_date: NaiveDate,
    pub fare_amount: Decimal,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(fare: &str, distance: &str) -> RideInput {
        RideInput {
            id: None,
            passenger_name: "Ama Owusu".to_string(),
            pickup_location: "Osu".to_string(),
            dropoff_location: "Kotoka Airport".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            fare_amount: fare.parse().unwrap(),
            distance: distance.parse().unwrap(),
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RideStatus::Upcoming.is_terminal());
        assert!(RideStatus::Completed.is_terminal());
        assert!(RideStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(RideStatus::Upcoming.can_transition_to(RideStatus::Completed));
        assert!(RideStatus::Upcoming.can_transition_to(RideStatus::Cancelled));
        assert!(!RideStatus::Upcoming.can_transition_to(RideStatus::Upcoming));
        assert!(!RideStatus::Completed.can_transition_to(RideStatus::Cancelled));
        assert!(!RideStatus::Cancelled.can_transition_to(RideStatus::Completed));
    }

    #[test]
    fn test_zero_amounts_are_valid() {
        assert!(input("0", "0").validate().is_ok());
    }

    #[test]
    fn test_negative_amounts_collect_all_errors() {
        match input("-1.50", "-3").validate() {
            Err(SparrowError::ValidationFailed(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["fare_amount", "distance"]);
            }
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_maps_to_status() {
        assert_eq!(RideStatus::from(RideFilter::Upcoming), RideStatus::Upcoming);
        assert_eq!(RideStatus::from(RideFilter::Completed), RideStatus::Completed);
    }
}
