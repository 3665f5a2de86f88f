//! HTTP handlers for the codegen service.

pub mod generate;
pub mod health;
