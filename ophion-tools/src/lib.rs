//! Declarative tool descriptors and the generic invocation path
//!
//! One schema-driven descriptor per wrapped tool replaces hand-written
//! argument-shaping functions: a descriptor names the input/output/param
//! slots a tool accepts, and a single binder turns caller-supplied values
//! into a [`ophion_engine::JobSpec`].

pub mod descriptor;
pub mod invoke;
pub mod registry;

// Re-exports for convenience
pub use descriptor::{Slot, ToolDescriptor};
pub use invoke::{bind, invoke, ToolArgs};
pub use registry::{all_tools, get_tool, tool_names};
