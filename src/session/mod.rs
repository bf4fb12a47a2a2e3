//! Session module
//!
//! One feed session: the fetched catalog, the visible window, the step
//! cursor and the in-flight, exhausted and error flags.
//!
//! # Overview
//!
//! - `SessionState` - the flags and collections, changed only through
//!   named transitions
//! - `FeedSession` - async driver: `activate` fetches, `load_more` reveals
//!   the next page after the pacing delay

mod feed;
mod state;

pub use feed::FeedSession;
pub use state::{
    FetchFailure, FetchOutcome, LoadOutcome, SessionSnapshot, SessionState, SkipReason,
};

#[cfg(test)]
mod tests;
