// src/services/status_service.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing;

use crate::{
    models::driver::DriverStatus,
    utils::clock::{Clock, SystemClock},
};

/// Anything that can tell the ride ledger whether the driver takes new rides.
pub trait Availability {
    fn current(&self) -> DriverStatus;
}

#[derive(Debug)]
pub struct DriverStatusController {
    status: DriverStatus,
    changed_at: Option<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl Default for DriverStatusController {
    fn default() -> Self {
        Self::new(DriverStatus::default())
    }
}

impl DriverStatusController {
    pub fn new(initial: DriverStatus) -> Self {
        Self::with_clock(initial, Arc::new(SystemClock))
    }

    pub fn with_clock(initial: DriverStatus, clock: Arc<dyn Clock>) -> Self {
        Self {
            status: initial,
            changed_at: None,
            clock,
        }
    }

    /// Flips Offline <-> Online and returns the new status.
    ///
    /// Upcoming rides do not block going offline.
    pub fn toggle(&mut self) -> DriverStatus {
        let previous = self.status;
        self.status = previous.flipped();
        self.changed_at = Some(self.clock.now());

        tracing::info!("Driver status changed: {} -> {}", previous, self.status);

        self.status
    }

    pub fn current(&self) -> DriverStatus {
        self.status
    }

    /// When the driver last toggled, `None` until the first toggle.
    pub fn changed_at(&self) -> Option<DateTime<Utc>> {
        self.changed_at
    }
}

impl Availability for DriverStatusController {
    fn current(&self) -> DriverStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn test_toggle_flips_and_returns_new_status() {
        let mut controller = DriverStatusController::default();
        assert_eq!(controller.current(), DriverStatus::Offline);
        assert_eq!(controller.toggle(), DriverStatus::Online);
        assert_eq!(controller.current(), DriverStatus::Online);
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        for initial in [DriverStatus::Offline, DriverStatus::Online] {
            let mut controller = DriverStatusController::new(initial);
            controller.toggle();
            assert_eq!(controller.toggle(), initial);
        }
    }

    #[test]
    fn test_changed_at_is_set_on_toggle() {
        let mut controller = DriverStatusController::new(DriverStatus::Online);
        assert!(controller.changed_at().is_none());
        controller.toggle();
        assert!(controller.changed_at().is_some());
    }

    #[test]
    fn test_changed_at_comes_from_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
        let mut controller =
            DriverStatusController::with_clock(DriverStatus::Offline, Arc::new(clock));
        controller.toggle();
        assert_eq!(controller.changed_at(), Some(clock.now()));
    }

    #[test]
    fn test_availability_matches_current() {
        let controller = DriverStatusController::new(DriverStatus::Online);
        assert_eq!(Availability::current(&controller), DriverStatus::Online);
    }
}
