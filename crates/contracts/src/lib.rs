//! # Contracts
//!
//! Shared interface contracts, defining inter-module data structures and traits.
//! All business crates depend on this crate; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Every cycle captures one UTC timestamp (`chrono::DateTime<Utc>`)
//! - The same instant drives logfile rotation, row timestamp text and the
//!   time-series record

mod config;
mod error;
mod point;
mod sensor;
mod sensor_source;
mod sink;

pub use config::*;
pub use error::*;
pub use point::*;
pub use sensor::*;
pub use sensor_source::{LocalTemperatureSource, TemperatureSource};
pub use sink::*;
