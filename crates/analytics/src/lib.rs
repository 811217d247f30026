//! # Records Analytics Engine
//!
//! Derives summary statistics from marks: averages, totals, grade letters and
//! the best/worst mark of a course.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of storage or HTTP. It depends
//!   only on `core-types`; callers fetch and filter the marks it works on.
//! - **Stateless Calculation:** Every function takes its input by reference and
//!   returns a value or an `AnalyticsError`. Nothing is logged here.
//!
//! ## Public API
//!
//! - `calculate_average`, `calculate_sum`, `get_grade`: the aggregation primitives.
//! - `try_get_highest_mark_for_course`, `try_get_lowest_mark_for_course`: course extremes.
//! - `build_student_details`: the per-student aggregate served by the API.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{
    calculate_average, calculate_sum, get_grade, try_get_highest_mark_for_course,
    try_get_lowest_mark_for_course,
};
pub use error::AnalyticsError;
pub use report::build_student_details;
