//! Domain models for the FarmIQ advisory service

mod crop;
mod disease;
mod fertilizer;
mod weather;

pub use crop::*;
pub use disease::*;
pub use fertilizer::*;
pub use weather::*;
