#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Log tracing output to the terminal and to disc.
mod error;
mod logger;

pub use error::Error;
pub use logger::Logger;
pub use tracing_appender::non_blocking::WorkerGuard;

pub(crate) type Result<T> = std::result::Result<T, Error>;
