//! View module
//!
//! The boundary between a feed session and whatever draws it.
//!
//! # Overview
//!
//! - `Screen` - error text, empty message, or the list with an optional
//!   loading footer, derived from a session snapshot
//! - `EndReachedTrigger` - turns scroll positions into `load_more` calls
//! - `render_pretty` / `render_json` - terminal renderers

mod model;
mod render;
mod scroll;

pub use model::{Row, Screen, EMPTY_MESSAGE, LOADING_FOOTER};
pub use render::{pretty_row, render_json, render_pretty};
pub use scroll::{EndReachedTrigger, ScrollMetrics};
