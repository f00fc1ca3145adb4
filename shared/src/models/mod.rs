//! Domain models for the Amar Foshol platform

mod advisory;
mod batch;
mod loss;
mod user;
mod weather;

pub use advisory::*;
pub use batch::*;
pub use loss::*;
pub use user::*;
pub use weather::*;
