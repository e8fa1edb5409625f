//! Request adapters for low-code platform component services.
//!
//! Component handlers receive `(value_or_file, args)` through the
//! [`ValueArgs`] and [`FileArgs`] extractors and stay independent of how the
//! request arrived.

pub mod client;
pub mod components;
pub mod config;
pub mod extract;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use extract::{Args, ExtractError, FileArgs, UploadedFile, ValueArgs};
pub use http::{HttpServer, ServiceError};
pub use lifecycle::Shutdown;
