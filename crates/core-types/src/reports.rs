use crate::enums::Grade;
use crate::structs::Mark;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate view of one student's marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub student_id: i32,
    pub student_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_mark: Decimal,
    pub total_marks: i64,
    pub grade: Grade,
}

/// One row of a student's mark listing. Timestamps are the stored ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReportRow {
    pub student_id: i32,
    pub course_id: i32,
    pub mark_value: i32,
    pub created_on: DateTime<Utc>,
    pub last_modified_on: DateTime<Utc>,
}

impl From<&Mark> for MarkReportRow {
    fn from(mark: &Mark) -> Self {
        Self {
            student_id: mark.student_id,
            course_id: mark.course_id,
            mark_value: mark.mark_value,
            created_on: mark.created_on,
            last_modified_on: mark.last_modified_on,
        }
    }
}

/// The best or worst mark in a course together with the student who earned it.
///
/// A course without marks yields the empty value: `0` and an empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseExtreme {
    pub mark_value: i32,
    pub student_name: String,
}

impl CourseExtreme {
    pub fn is_empty(&self) -> bool {
        self.mark_value == 0 && self.student_name.is_empty()
    }
}
