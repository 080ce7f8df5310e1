//! Core engine for logtab: poll a directory of `.log` files, track a byte
//! offset per file, and report appearances, disappearances, and newly
//! appended content to a presentation sink.
//!
//! The library is UI-free. The binary crate wires [`Monitor`] to a
//! background thread and a terminal UI; tests drive it directly with a
//! recording sink.

pub mod monitor;
pub mod reader;
pub mod scanner;
pub mod sink;
pub mod tracker;

pub use monitor::Monitor;
pub use sink::{Notification, Sink};
