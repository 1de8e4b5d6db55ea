//! HTTP request handlers

pub mod crop;
pub mod disease;
pub mod fertilizer;
pub mod health;
pub mod pages;

pub use crop::*;
pub use disease::*;
pub use fertilizer::*;
pub use health::*;
pub use pages::*;
