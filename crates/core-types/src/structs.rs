use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student enrolled at the institution.
///
/// `id` is assigned by the store; a value sent by a client on create is ignored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: i32,
    pub student_name: String,
}

impl Student {
    pub fn new(student_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            student_name: student_name.into(),
        }
    }
}

/// A course marks can be recorded against.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: i32,
    pub course_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Course {
    pub fn new(course_name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            course_name: course_name.into(),
            description,
        }
    }
}

/// The score one student earned in one course.
///
/// The schema does not enforce that `student_id` and `course_id` resolve;
/// callers check both before writing.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    #[serde(default)]
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub mark_value: i32,
    pub created_on: DateTime<Utc>,
    pub last_modified_on: DateTime<Utc>,
}

impl Mark {
    /// Creates an unsaved mark with both timestamps set to `now`.
    pub fn new(student_id: i32, course_id: i32, mark_value: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            student_id,
            course_id,
            mark_value,
            created_on: now,
            last_modified_on: now,
        }
    }

    /// Replaces the value and refreshes `last_modified_on`. `created_on` is kept.
    pub fn revise(&mut self, mark_value: i32, now: DateTime<Utc>) {
        self.mark_value = mark_value;
        self.last_modified_on = now;
    }

    pub fn belongs_to(&self, student_id: i32, course_id: i32) -> bool {
        self.student_id == student_id && self.course_id == course_id
    }
}
