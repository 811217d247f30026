//! # Records Core Types
//!
//! The shared vocabulary of the workspace: the persisted entities and the
//! report shapes handed to the request layer. This crate holds no logic beyond
//! small conversions, so every other crate can depend on it.

pub mod enums;
pub mod reports;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Grade;
pub use reports::{CourseExtreme, MarkReportRow, StudentDetails};
pub use structs::{Course, Mark, Student};
