// src/services/mod.rs
pub mod earnings_service;
pub mod query_service;
pub mod ride_ledger;
pub mod status_service;

pub use earnings_service::{EarningsAggregator, EarningsOperations};
pub use query_service::QueryFacade;
pub use ride_ledger::{RideLedger, RideOperations};
pub use status_service::{Availability, DriverStatusController};
