//! Platform-neutral controller for the air-quality dashboard.
//!
//! [`Dashboard`] owns every piece of display state: the readout fields, the
//! status indicator, the error banner and the two map overlays. Front ends
//! feed it user actions, run the [`PendingRequest`]s it hands back through a
//! [`Transport`], and report the outcome with [`Dashboard::complete`]. The
//! browser app and the CLI differ only in the `Transport` and [`MapSurface`]
//! they plug in.

pub mod controller;
pub mod error;
pub mod map;
pub mod readout;
pub mod sequence;
pub mod status;
pub mod transport;

pub use controller::*;
pub use error::*;
pub use map::*;
pub use readout::*;
pub use sequence::*;
pub use status::*;
pub use transport::*;
