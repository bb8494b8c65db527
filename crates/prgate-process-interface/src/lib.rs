//! Process interface

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod interface;
mod tokio_process;

pub use errors::{ProcessError, Result};
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockProcessService;
pub use interface::{ProcessExit, ProcessService, ProcessSpec};
pub use tokio_process::TokioProcessService;
