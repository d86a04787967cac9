// src/services/ride_ledger.rs
use chrono::{DateTime, NaiveDate, Utc};
use std::{collections::HashMap, sync::Arc};
use tracing;

use crate::{
    errors::{SparrowError as AppError, SparrowResult},
    models::ride::{CompletionRecord, Ride, RideId, RideInput, RideStatus},
    services::status_service::Availability,
    utils::{
        clock::{Clock, SystemClock},
        id_generator::{IdGenerator, IdType},
    },
};

pub trait RideOperations {
    fn add_ride(&mut self, input: RideInput, availability: &dyn Availability) -> SparrowResult<RideId>;
    fn import_ride(&mut self, ride: Ride) -> SparrowResult<RideId>;
    fn transition(&mut self, ride_id: &str, target: RideStatus) -> SparrowResult<()>;
    fn get(&self, ride_id: &str) -> SparrowResult<&Ride>;
    fn list_by_status(&self, status: RideStatus) -> Vec<Ride>;
}

/// Single source of truth for rides. Rides are never removed.
#[derive(Debug)]
pub struct RideLedger {
    rides: Vec<Ride>,
    index: HashMap<RideId, usize>,
    completions: Vec<CompletionRecord>,
    clock: Arc<dyn Clock>,
}

impl Default for RideLedger {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl RideLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rides: Vec::new(),
            index: HashMap::new(),
            completions: Vec::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    pub fn contains(&self, ride_id: &str) -> bool {
        self.index.contains_key(ride_id)
    }

    /// Earnings-eligible records, in the order rides reached Completed.
    pub fn completion_records(&self) -> &[CompletionRecord] {
        &self.completions
    }

    /// Completed rides scheduled within `start..=end`.
    pub fn completed_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &Ride> + '_ {
        self.rides.iter().filter(move |ride| {
            ride.status == RideStatus::Completed
                && ride.scheduled_date >= start
                && ride.scheduled_date <= end
        })
    }

    fn ensure_unique(&self, ride_id: &str) -> SparrowResult<()> {
        if self.contains(ride_id) {
            return Err(AppError::validation_error(
                "id",
                format!("Ride {} already exists", ride_id),
            ));
        }
        Ok(())
    }

    fn insert(&mut self, ride: Ride) -> RideId {
        if ride.status == RideStatus::Completed {
            self.completions.push(completion_for(&ride, self.clock.now()));
        }
        let id = ride.id.clone();
        self.index.insert(id.clone(), self.rides.len());
        self.rides.push(ride);
        id
    }
}

fn completion_for(ride: &Ride, completed_at: DateTime<Utc>) -> CompletionRecord {
    CompletionRecord {
        ride_id: ride.id.clone(),
        ride_date: ride.scheduled_date,
        fare_amount: ride.fare_amount,
        completed_at,
    }
}

impl RideOperations for RideLedger {
    fn add_ride(&mut self, mut input: RideInput, availability: &dyn Availability) -> SparrowResult<RideId> {
        if !availability.current().is_online() {
            tracing::warn!("Rejected ride for {}: driver is offline", input.passenger_name);
            return Err(AppError::DriverOffline);
        }

        input.validate()?;

        let id = match input.id.take() {
            Some(id) => {
                self.ensure_unique(&id)?;
                id
            }
            None => IdGenerator::generate_unique(IdType::Ride, self.clock.now(), |candidate| {
                self.contains(candidate)
            }),
        };

        let ride = input.into_ride(id, RideStatus::Upcoming);
        tracing::info!(
            "Ride added: {} for {} on {} {} - {}",
            ride.id,
            ride.passenger_name,
            ride.scheduled_date,
            ride.scheduled_time,
            ride.fare_amount
        );

        Ok(self.insert(ride))
    }

    fn import_ride(&mut self, ride: Ride) -> SparrowResult<RideId> {
        let status = ride.status;
        let input = RideInput::from(ride);
        input.validate()?;

        // validate() has already rejected a blank id
        let id = input.id.clone().unwrap_or_default();
        self.ensure_unique(&id)?;

        tracing::debug!("Imported ride {} with status {}", id, status);

        Ok(self.insert(input.into_ride(id, status)))
    }

    fn transition(&mut self, ride_id: &str, target: RideStatus) -> SparrowResult<()> {
        let position = *self
            .index
            .get(ride_id)
            .ok_or_else(|| AppError::ride_not_found(ride_id))?;
        let ride = &mut self.rides[position];

        if !ride.status.can_transition_to(target) {
            tracing::warn!(
                "Rejected transition for ride {}: {} -> {}",
                ride_id,
                ride.status,
                target
            );
            return Err(AppError::invalid_transition(ride_id, ride.status, target));
        }

        let previous = ride.status;
        ride.status = target;
        if target == RideStatus::Completed {
            self.completions.push(completion_for(ride, self.clock.now()));
        }

        tracing::info!("Ride {} transitioned: {} -> {}", ride_id, previous, target);

        Ok(())
    }

    fn get(&self, ride_id: &str) -> SparrowResult<&Ride> {
        self.index
            .get(ride_id)
            .map(|&position| &self.rides[position])
            .ok_or_else(|| AppError::ride_not_found(ride_id))
    }

    fn list_by_status(&self, status: RideStatus) -> Vec<Ride> {
        let mut rides: Vec<Ride> = self
            .rides
            .iter()
            .filter(|ride| ride.status == status)
            .cloned()
            .collect();

        // Stable sort keeps insertion order for identical schedules
        rides.sort_by_key(|ride| (ride.scheduled_date, ride.scheduled_time));

        tracing::debug!("Listed {} {} rides", rides.len(), status);

        rides
    }
}
