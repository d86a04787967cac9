// src/models/transaction.rs
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TransactionId = String;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,   // Transfer requested, not yet settled
    Completed, // Money reached the driver
    Failed,    // Transfer bounced
}

impl TransactionStatus {
    pub fn is_settled(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Completed => write!(f, "Completed"),
            TransactionStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A payout to the driver.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}
