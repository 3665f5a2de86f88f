//! Service-layer building blocks.

pub mod providers;
