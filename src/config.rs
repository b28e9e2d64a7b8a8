//! Configuration loader and schema types.
//!
//! The schema lives in `config::schema`; `Settings::load` layers the optional
//! config file and `TAPEDECK__*` environment variables over struct defaults.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;
