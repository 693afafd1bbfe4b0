//! Foundation layer: shared primitives grouped for the layered architecture.

pub mod constants;
pub mod error;
pub mod network;
pub mod types;
pub mod util;

pub use constants::*;
pub use error::*;
pub use network::NetworkMode;
pub use types::*;
