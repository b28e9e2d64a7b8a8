//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model`. It is the controller's
//! presentation listener and holds the rendered rows, the selection and
//! the playback state shown in the status box.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
