//! Step definitions for connector diagnosis scenarios.

mod given;
mod then;
mod when;
pub mod world;
