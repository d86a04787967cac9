// src/services/query_service.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing;

use crate::{
    errors::SparrowResult,
    models::{
        earnings::{EarningsView, HomeSummary},
        ride::{Ride, RideFilter},
    },
    services::{
        earnings_service::{EarningsAggregator, EarningsOperations},
        ride_ledger::{RideLedger, RideOperations},
        status_service::DriverStatusController,
    },
    utils::clock::Clock,
};

/// Read-only view composition for the screens.
///
/// Holds shared borrows only, so nothing built from a `QueryFacade` can
/// observe or cause a half-applied mutation.
pub struct QueryFacade<'a> {
    status: &'a DriverStatusController,
    ledger: &'a RideLedger,
    earnings: &'a EarningsAggregator,
    clock: &'a dyn Clock,
    rating: f32,
}

impl<'a> QueryFacade<'a> {
    pub fn new(
        status: &'a DriverStatusController,
        ledger: &'a RideLedger,
        earnings: &'a EarningsAggregator,
        clock: &'a dyn Clock,
        rating: f32,
    ) -> Self {
        Self {
            status,
            ledger,
            earnings,
            clock,
            rating,
        }
    }

    pub fn home_summary(&self) -> HomeSummary {
        let today = self.earnings.day_earnings(self.ledger, self.clock.today());

        HomeSummary {
            status: self.status.current(),
            today_earnings: today.amount,
            today_ride_count: today.ride_count,
            rating: self.rating,
        }
    }

    pub fn rides_view(&self, filter: RideFilter) -> Vec<Ride> {
        self.ledger.list_by_status(filter.into())
    }

    /// Fails only when the week does not fit in the calendar.
    pub fn earnings_view(&self, week_start: NaiveDate) -> SparrowResult<EarningsView> {
        let daily_breakdown = self.earnings.daily_breakdown(self.ledger, week_start)?;
        let total: Decimal = daily_breakdown.iter().map(|day| day.amount).sum();

        tracing::debug!("Built earnings view for week of {}", daily_breakdown[0].date);

        Ok(EarningsView {
            total,
            daily_breakdown,
            transaction_history: self.earnings.transaction_history(None),
            available_balance: self.earnings.available_balance(self.ledger),
        })
    }

    /// Earnings view for the week containing today.
    pub fn current_week_earnings(&self) -> SparrowResult<EarningsView> {
        self.earnings_view(self.clock.today())
    }
}
