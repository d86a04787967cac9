// src/models/earnings.rs
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{driver::DriverStatus, transaction::Transaction};

/// One bar of the weekly earnings chart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyEarnings {
    pub day: String, // "Mon" .. "Sun"
    pub date: NaiveDate,
    pub amount: Decimal,
    pub ride_count: u32,
}

impl DailyEarnings {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            day: day_label(date.weekday()).to_string(),
            date,
            amount: Decimal::ZERO,
            ride_count: 0,
        }
    }
}

pub fn day_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

// Screen view models
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HomeSummary {
    pub status: DriverStatus,
    pub today_earnings: Decimal,
    pub today_ride_count: u32,
    pub rating: f32, // Passed through from the rating source
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EarningsView {
    pub total: Decimal,
    pub daily_breakdown: [DailyEarnings; 7], // Monday first
    pub transaction_history: Vec<Transaction>,
    pub available_balance: Decimal,
}
