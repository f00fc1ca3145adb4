//! HTTP handlers for the Amar Foshol backend

mod advisory;
mod auth;
mod batch;
mod health;
mod loss;
mod risk;
mod weather;

pub use advisory::*;
pub use auth::*;
pub use batch::*;
pub use health::*;
pub use loss::*;
pub use risk::*;
pub use weather::*;
