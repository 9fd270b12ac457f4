//! Air-quality observations as reported by the lookup API, and the rules for
//! turning a batch of them into one displayable reading.
//!
//! - [`select_best`] picks the observation with the highest index.
//! - [`normalize`] maps an index (or an upstream category code) to a [`Category`].
//! - [`format_observed`] renders the observation timestamp.
//! - [`api`] describes the two lookup endpoints and their error bodies.

pub mod api;
pub mod category;
pub mod model;
pub mod observed;
pub mod scalar;
pub mod select;

pub use api::*;
pub use category::*;
pub use model::*;
pub use observed::*;
pub use scalar::Scalar;
pub use select::*;

/// Sentinel shown wherever a value cannot be resolved.
pub const UNAVAILABLE: &str = "Unavailable";
