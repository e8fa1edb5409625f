//! Request adapter: normalizes a component request into `(value, args)`.
//!
//! # Data Flow
//! ```text
//! POST application/json
//!     {"value": <any>, "args": <object | json string>}
//!     → json.rs       → ValueArgs(value, args)
//!
//! POST multipart/form-data
//!     file part + args part (text or file)
//!     → multipart.rs  → FileArgs(file, args)
//!
//! both → args.rs (decode configuration) → handler(value_or_file, args)
//! ```
//!
//! # Design Decisions
//! - One pass over the request; both halves succeed or the request is rejected
//! - Handlers stay framework-agnostic: they receive plain values and [`Args`]
//! - Field names come from [`ExtractConfig`], found in request extensions

pub mod args;
pub mod error;
pub mod json;
pub mod multipart;

use axum::http::Extensions;

pub use crate::config::ExtractConfig;
pub use args::{decode_args, decode_args_text, Args};
pub use error::ExtractError;
pub use json::{extract_value_args, value_args_from_slice, ValueArgs};
pub use multipart::{extract_file_args, FileArgs, UploadedFile};

impl ExtractConfig {
    /// Field names installed by the server, or the defaults when absent.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<Self>().cloned().unwrap_or_default()
    }
}
