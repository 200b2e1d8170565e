//! Request handlers.

pub mod fallback;
pub mod health;

pub use fallback::*;
pub use health::*;
