//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `json` - JSON pointer editing for config values

pub mod io;
pub mod json;
