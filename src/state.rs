// src/state.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing;

use crate::{
    config::AppConfig,
    errors::SparrowResult,
    models::{
        driver::DriverStatus,
        ride::{Ride, RideId, RideInput, RideStatus},
        transaction::{Transaction, TransactionId, TransactionStatus},
    },
    services::{
        DriverStatusController, EarningsAggregator, EarningsOperations, QueryFacade, RideLedger,
        RideOperations,
    },
    utils::{
        clock::{Clock, SystemClock},
        seed::SeedData,
    },
};

/// Everything one driver session owns.
///
/// Mutations take `&mut self` and reads go through [`DriverSession::query`],
/// so a read can never interleave with a half-applied change.
pub struct DriverSession {
    status: DriverStatusController,
    ledger: RideLedger,
    earnings: EarningsAggregator,
    clock: Arc<dyn Clock>,
    rating: f32,
}

impl DriverSession {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Every component reads time from `clock`.
    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let initial = if config.start_online {
            DriverStatus::Online
        } else {
            DriverStatus::Offline
        };

        Self {
            status: DriverStatusController::with_clock(initial, Arc::clone(&clock)),
            ledger: RideLedger::with_clock(Arc::clone(&clock)),
            earnings: EarningsAggregator::with_clock(Arc::clone(&clock)),
            clock,
            rating: config.driver_rating,
        }
    }

    /// Builds a session pre-populated with externally supplied data.
    /// Nothing is kept if any ride or transaction in the seed is rejected.
    pub fn from_seed(config: &AppConfig, seed: SeedData) -> SparrowResult<Self> {
        Self::new(config).seeded(seed)
    }

    /// Imports `seed` into this session, consuming it so a rejected seed
    /// leaves nothing behind.
    pub fn seeded(mut self, seed: SeedData) -> SparrowResult<Self> {
        for ride in seed.rides {
            self.ledger.import_ride(ride)?;
        }
        for transaction in seed.transactions {
            self.earnings.import_transaction(transaction)?;
        }

        tracing::info!(
            "Session seeded with {} rides and {} transactions",
            self.ledger.len(),
            self.earnings.transaction_count()
        );

        Ok(self)
    }

    // Mutating entry points

    pub fn toggle_status(&mut self) -> DriverStatus {
        self.status.toggle()
    }

    pub fn add_ride(&mut self, input: RideInput) -> SparrowResult<RideId> {
        self.ledger.add_ride(input, &self.status)
    }

    pub fn transition_ride(&mut self, ride_id: &str, target: RideStatus) -> SparrowResult<()> {
        self.ledger.transition(ride_id, target)
    }

    pub fn complete_ride(&mut self, ride_id: &str) -> SparrowResult<()> {
        self.transition_ride(ride_id, RideStatus::Completed)
    }

    pub fn cancel_ride(&mut self, ride_id: &str) -> SparrowResult<()> {
        self.transition_ride(ride_id, RideStatus::Cancelled)
    }

    pub fn record_payout(&mut self, amount: Decimal, date: NaiveDate) -> SparrowResult<TransactionId> {
        self.earnings.record_payout(amount, date)
    }

    pub fn settle_payout(
        &mut self,
        transaction_id: &str,
        outcome: TransactionStatus,
    ) -> SparrowResult<&Transaction> {
        self.earnings.settle_transaction(transaction_id, outcome)
    }

    /// Rating comes from outside this model and is only passed through.
    pub fn set_rating(&mut self, rating: f32) {
        self.rating = rating;
    }

    // Reads

    pub fn query(&self) -> QueryFacade<'_> {
        QueryFacade::new(
            &self.status,
            &self.ledger,
            &self.earnings,
            self.clock.as_ref(),
            self.rating,
        )
    }

    pub fn status(&self) -> DriverStatus {
        self.status.current()
    }

    pub fn ride(&self, ride_id: &str) -> SparrowResult<&Ride> {
        self.ledger.get(ride_id)
    }

    pub fn ride_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn weekly_total(&self, week_start: NaiveDate) -> SparrowResult<Decimal> {
        self.earnings.weekly_total(&self.ledger, week_start)
    }
}
