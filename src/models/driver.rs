// src/models/driver.rs
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverStatus {
    #[default]
    Offline, // Not accepting rides
    Online,  // Available for new rides
}

impl DriverStatus {
    pub fn flipped(self) -> Self {
        match self {
            DriverStatus::Offline => DriverStatus::Online,
            DriverStatus::Online => DriverStatus::Offline,
        }
    }

    pub fn is_online(self) -> bool {
        self == DriverStatus::Online
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverStatus::Offline => write!(f, "Offline"),
            DriverStatus::Online => write!(f, "Online"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped_is_symmetric() {
        assert_eq!(DriverStatus::Offline.flipped(), DriverStatus::Online);
        assert_eq!(DriverStatus::Online.flipped(), DriverStatus::Offline);
        assert_eq!(DriverStatus::Online.flipped().flipped(), DriverStatus::Online);
    }

    #[test]
    fn test_default_is_offline() {
        assert_eq!(DriverStatus::default(), DriverStatus::Offline);
        assert!(!DriverStatus::default().is_online());
    }
}
