pub mod error;
pub mod service;

pub use error::ScriptError;
pub use service::{GeneratedScript, ScriptService};
