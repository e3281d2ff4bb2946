pub mod condense;
pub mod registry;
pub mod reshape;
pub mod tools;

pub use condense::{condense, CondenseRules};
pub use registry::{BatchOutcome, RegistryConfig, ToolCall, ToolRegistry};
pub use tools::build_registry;
