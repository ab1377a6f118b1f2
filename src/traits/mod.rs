pub mod engine;

pub use engine::{EngineReply, WorkflowEngine};
