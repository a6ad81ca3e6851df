//! Core domain for the Umbrella hazard map.
//!
//! Static catalogs (glacial lakes, districts, villages), the rainfall risk
//! classifier, and, behind the `api` feature, the concurrent rainfall fetch
//! and the all-or-wait aggregation join that feeds the flood layer.

pub mod aggregation;
pub mod catalog;
pub mod district;
pub mod error;
#[cfg(feature = "api")]
pub mod fetcher;
pub mod lake;
pub mod measurement;
#[cfg(feature = "api")]
pub mod pipeline;
pub mod risk;
pub mod status;
pub mod vulnerability;

pub use error::{HazardError, Result};
