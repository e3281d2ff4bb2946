//! Sprig exposes child behavioral-tracking data to an LLM agent through a
//! small set of schema-described tools, scoped to an in-memory caller
//! session. This crate re-exports the public surface of the workspace;
//! the protocol/transport layer embedding it wires a [`DataService`]
//! implementation and an [`UpdateNotifier`] into [`build_registry`].

pub use sprig_core::errors::ToolError;
pub use sprig_core::ids::{CallerId, ChildId, EntryId, SessionId};
pub use sprig_core::service::{
    Category, ChildRef, DataService, Page, SearchPayload, ServiceError, TimeWindow,
};
pub use sprig_core::tools::{
    ChildSelection, Execution, Timing, Tool, ToolContext, ToolDefinition,
};
pub use sprig_core::update::{NoUpdates, UpdateNotifier};

pub use sprig_store::{Session, SessionPatch, SessionStore, StoreError, DEFAULT_MAX_AGE_HOURS};

pub use sprig_client::{ClientConfig, HttpDataService, MockDataService};

pub use sprig_engine::{
    build_registry, condense, BatchOutcome, CondenseRules, RegistryConfig, ToolCall,
    ToolRegistry,
};

pub use sprig_telemetry::{init_telemetry, TelemetryConfig};
