//! Snippet execution support for chatpad.
//!
//! - [`language`]: the closed language set and the detection heuristic
//! - [`local`]: in-process JavaScript evaluation with console capture
//! - [`remote`]: delegation of Python, Java and PHP to an HTTP service
//! - [`format`]: the heuristic JavaScript reformatter
//! - [`report`]: the colour-coded result shown in the output panel

pub mod error;
pub mod format;
pub mod http;
pub mod language;
pub mod local;
pub mod remote;
pub mod report;

pub use error::ExecError;
pub use format::format_javascript;
pub use http::HttpExecutor;
pub use language::Language;
pub use local::JsEvaluator;
pub use remote::{ExecRequest, ExecResponse, RemoteExecutor, RemoteRunner};
pub use report::{OutputStatus, RunReport};
