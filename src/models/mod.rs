// src/models/mod.rs
pub mod driver;
pub mod earnings;
pub mod ride;
pub mod transaction;

pub use driver::*;
pub use earnings::*;
pub use ride::*;
pub use transaction::*;
