//! # Ingestion
//!
//! Sensor reading module.
//!
//! Responsibilities:
//! - Talk to owserver and return raw sensor values (`OwServerClient`)
//! - Provide a scripted source for tests (`MockTemperatureSource`)
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::{OwServerConfig, TemperatureSource};
//! use ingestion::OwServerClient;
//!
//! let client = OwServerClient::new(&OwServerConfig::default())?;
//! let raw = client.read("28.ABCD01234567").await?;
//! ```

mod mock;
mod owserver;
pub mod protocol;

pub use mock::MockTemperatureSource;
pub use owserver::OwServerClient;
