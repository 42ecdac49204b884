//! Validation of call parameters before a transition runs.
//!
//! Missing keys are accumulated with Stillwater's `Validation` so every
//! absent parameter is reported at once instead of one per attempt.
//!
//! # Example
//!
//! ```rust
//! use statecraft::core::Params;
//! use statecraft::enforcement::missing_params;
//! use serde_json::json;
//!
//! let mut params = Params::new();
//! params.insert("amount".to_string(), json!(10));
//!
//! let required = vec!["amount".to_string(), "currency".to_string(), "note".to_string()];
//! assert_eq!(missing_params(&required, &params), vec!["currency", "note"]);
//! ```

mod required;

pub use required::{check_required, missing_params};
