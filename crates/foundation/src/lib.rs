pub mod geo;
pub mod math;
pub mod numeric;

// Foundation crate: small, well-tested geographic primitives only.
pub use geo::*;
pub use numeric::*;
