//! Shared types and domain logic for the Amar Foshol platform
//!
//! This crate contains types and pure computations shared between the
//! backend, the browser (via WASM), and other components of the system.

pub mod advisory;
pub mod locations;
pub mod models;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use models::*;
pub use types::*;
pub use validation::*;
