//! Core types for the daybook backend.
//!
//! This crate provides the event model shared across daybook services and the
//! recurrence engine that expands recurring events into concrete occurrences:
//! - `event::Event` for base events and generated occurrences
//! - `recurrence` for recurrence rules and range expansion
//! - `date_range::DateRange` for inclusive query windows

pub mod date_range;
pub mod error;
pub mod event;
pub mod recurrence;

// Re-export the main types at crate root for convenience
pub use date_range::DateRange;
pub use error::{DaybookError, DaybookResult};
pub use event::Event;
pub use recurrence::{RecurrenceRule, events_in_range, expand_recurring_event};
