//! Tool surface exposed over the Model Context Protocol.
//!
//! Each tool has one boundary function in [`handlers`] that calls the
//! diagnostics service and converts its typed result into a JSON envelope.
//! [`server`] registers those functions with `rmcp`.

pub mod envelope;
pub mod handlers;
pub mod params;
pub mod server;

pub use envelope::{ToolEnvelope, ToolError};
pub use params::{AgentIdParams, ConnectorIdParams, ListParams, SyncHistoryParams};
pub use server::DoctorServer;
