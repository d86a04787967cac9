// src/services/earnings_service.rs
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use std::{collections::HashMap, sync::Arc};
use tracing;

use crate::{
    errors::{SparrowError as AppError, SparrowResult},
    models::{
        earnings::DailyEarnings,
        transaction::{Transaction, TransactionId, TransactionStatus},
    },
    services::ride_ledger::RideLedger,
    utils::{
        clock::{Clock, SystemClock},
        id_generator::{IdGenerator, IdType},
    },
};

pub trait EarningsOperations {
    fn daily_breakdown(
        &self,
        ledger: &RideLedger,
        week_start: NaiveDate,
    ) -> SparrowResult<[DailyEarnings; 7]>;
    fn weekly_total(&self, ledger: &RideLedger, week_start: NaiveDate) -> SparrowResult<Decimal>;
    fn record_payout(&mut self, amount: Decimal, date: NaiveDate) -> SparrowResult<TransactionId>;
    fn transaction_history(&self, limit: Option<usize>) -> Vec<Transaction>;
}

/// Monday of the ISO week containing `date`.
///
/// Fails for the first days of the calendar, whose Monday is not representable.
pub fn week_monday(date: NaiveDate) -> SparrowResult<NaiveDate> {
    let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(back).ok_or_else(|| week_out_of_range(date))
}

fn week_out_of_range(week_start: NaiveDate) -> AppError {
    tracing::warn!("Week of {} falls outside the supported calendar", week_start);
    AppError::validation_error(
        "week_start",
        format!("Week of {} falls outside the supported calendar", week_start),
    )
}

/// Derives earnings from the ride ledger and owns the payout ledger.
#[derive(Debug)]
pub struct EarningsAggregator {
    transactions: Vec<Transaction>,
    index: HashMap<TransactionId, usize>,
    clock: Arc<dyn Clock>,
}

impl Default for EarningsAggregator {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl EarningsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            transactions: Vec::new(),
            index: HashMap::new(),
            clock,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn get_transaction(&self, transaction_id: &str) -> SparrowResult<&Transaction> {
        self.index
            .get(transaction_id)
            .map(|&position| &self.transactions[position])
            .ok_or_else(|| AppError::transaction_not_found(transaction_id))
    }

    /// Earnings for a single calendar day.
    pub fn day_earnings(&self, ledger: &RideLedger, date: NaiveDate) -> DailyEarnings {
        let mut day = DailyEarnings::empty(date);
        for ride in ledger.completed_between(date, date) {
            day.amount += ride.fare_amount;
            day.ride_count += 1;
        }
        day
    }

    /// Every fare the ledger has recorded as completed.
    pub fn lifetime_earnings(&self, ledger: &RideLedger) -> Decimal {
        ledger
            .completion_records()
            .iter()
            .map(|record| record.fare_amount)
            .sum()
    }

    pub fn total_paid_out(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Completed)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Unpaid earnings, floored at zero when imported payout history
    /// predates the rides in the ledger.
    pub fn available_balance(&self, ledger: &RideLedger) -> Decimal {
        (self.lifetime_earnings(ledger) - self.total_paid_out()).max(Decimal::ZERO)
    }

    /// Appends a historical payout in whatever status it was exported with.
    pub fn import_transaction(&mut self, transaction: Transaction) -> SparrowResult<TransactionId> {
        validate_amount(transaction.amount)?;
        if transaction.id.trim().is_empty() {
            return Err(AppError::validation_error("id", "Transaction ID must not be blank"));
        }
        if self.index.contains_key(&transaction.id) {
            return Err(AppError::validation_error(
                "id",
                format!("Transaction {} already exists", transaction.id),
            ));
        }

        tracing::debug!(
            "Imported transaction {} ({}) with status {}",
            transaction.id,
            transaction.amount,
            transaction.status
        );

        Ok(self.append(transaction))
    }

    /// Resolves a pending payout. Completed and Failed payouts are final.
    pub fn settle_transaction(
        &mut self,
        transaction_id: &str,
        outcome: TransactionStatus,
    ) -> SparrowResult<&Transaction> {
        let position = *self
            .index
            .get(transaction_id)
            .ok_or_else(|| AppError::transaction_not_found(transaction_id))?;
        let transaction = &mut self.transactions[position];

        if transaction.status.is_settled() || !outcome.is_settled() {
            tracing::warn!(
                "Rejected settlement for transaction {}: {} -> {}",
                transaction_id,
                transaction.status,
                outcome
            );
            return Err(AppError::invalid_transition(
                transaction_id,
                transaction.status,
                outcome,
            ));
        }

        transaction.status = outcome;
        tracing::info!("Transaction {} settled as {}", transaction_id, outcome);

        Ok(&*transaction)
    }

    fn append(&mut self, transaction: Transaction) -> TransactionId {
        let id = transaction.id.clone();
        self.index.insert(id.clone(), self.transactions.len());
        self.transactions.push(transaction);
        id
    }
}

fn validate_amount(amount: Decimal) -> SparrowResult<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::validation_error(
            "amount",
            "Payout amount must be greater than zero",
        ));
    }
    Ok(())
}

impl EarningsOperations for EarningsAggregator {
    fn daily_breakdown(
        &self,
        ledger: &RideLedger,
        week_start: NaiveDate,
    ) -> SparrowResult<[DailyEarnings; 7]> {
        let monday = week_monday(week_start)?;
        let sunday = monday
            .checked_add_days(Days::new(6))
            .ok_or_else(|| week_out_of_range(week_start))?;
        // Sunday is representable, so every day before it is too
        let mut days: [DailyEarnings; 7] =
            std::array::from_fn(|offset| DailyEarnings::empty(monday + Days::new(offset as u64)));

        for ride in ledger.completed_between(monday, sunday) {
            let offset = (ride.scheduled_date - monday).num_days() as usize;
            days[offset].amount += ride.fare_amount;
            days[offset].ride_count += 1;
        }

        tracing::debug!("Computed daily breakdown for week of {}", monday);

        Ok(days)
    }

    fn weekly_total(&self, ledger: &RideLedger, week_start: NaiveDate) -> SparrowResult<Decimal> {
        Ok(self
            .daily_breakdown(ledger, week_start)?
            .iter()
            .map(|day| day.amount)
            .sum())
    }

    fn record_payout(&mut self, amount: Decimal, date: NaiveDate) -> SparrowResult<TransactionId> {
        if let Err(err) = validate_amount(amount) {
            tracing::warn!("Rejected payout of {}", amount);
            return Err(err);
        }

        let now = self.clock.now();
        let id = IdGenerator::generate_unique(IdType::Payout, now, |candidate| {
            self.index.contains_key(candidate)
        });
        let transaction = Transaction {
            id,
            amount,
            date,
            status: TransactionStatus::Completed,
            recorded_at: now,
        };

        tracing::info!("Payout recorded: {} - {} on {}", transaction.id, amount, date);

        Ok(self.append(transaction))
    }

    fn transaction_history(&self, limit: Option<usize>) -> Vec<Transaction> {
        let mut ordered: Vec<(usize, &Transaction)> = self.transactions.iter().enumerate().collect();
        // Newest date first; later appends win ties
        ordered.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));

        ordered
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(_, tx)| tx.clone())
            .collect()
    }
}
