// Adapters layer: concrete implementations of the domain ports.

pub mod tool_service;

pub use tool_service::ToolServiceCmd;
