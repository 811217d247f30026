use crate::{error::AppError, AppState};
use analytics::{
    build_student_details, try_get_highest_mark_for_course, try_get_lowest_mark_for_course,
    AnalyticsError,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use core_types::{Course, CourseExtreme, Mark, MarkReportRow, Student, StudentDetails};
use std::collections::HashMap;
use std::sync::Arc;

type StudentCoursePath = Path<(i32, i32)>;

/// # POST /api/marks/student/:student_id/course/:course_id
/// Records a mark (request body: the integer value) and returns its id.
///
/// A student has at most one mark per course; a second one is a conflict.
pub async fn add_mark_for_student(
    State(state): State<Arc<AppState>>,
    Path((student_id, course_id)): StudentCoursePath,
    Json(mark_value): Json<i32>,
) -> Result<Json<i32>, AppError> {
    require_student(&state, student_id).await?;
    require_course(&state, course_id).await?;

    if find_mark(&state, student_id, course_id).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Student {student_id} already has a mark for course {course_id}"
        )));
    }

    let mark = Mark::new(student_id, course_id, mark_value, Utc::now());
    let created = state.marks.create(&mark).await?;
    tracing::info!(mark_id = created.id, student_id, course_id, "Mark recorded.");
    Ok(Json(created.id))
}

/// # PUT /api/marks/student/:student_id/course/:course_id
/// Replaces the value of an existing mark and refreshes its modification time.
pub async fn update_mark_for_student(
    State(state): State<Arc<AppState>>,
    Path((student_id, course_id)): StudentCoursePath,
    Json(mark_value): Json<i32>,
) -> Result<&'static str, AppError> {
    require_student(&state, student_id).await?;
    require_course(&state, course_id).await?;

    let mut mark = find_mark(&state, student_id, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mark not found".to_string()))?;

    mark.revise(mark_value, Utc::now());
    state.marks.update(mark.id, &mark).await?;
    tracing::info!(mark_id = mark.id, "Mark updated.");
    Ok("Mark updated successfully")
}

/// # DELETE /api/marks/student/:student_id/course/:course_id
pub async fn delete_mark_for_student(
    State(state): State<Arc<AppState>>,
    Path((student_id, course_id)): StudentCoursePath,
) -> Result<&'static str, AppError> {
    let mark = find_mark(&state, student_id, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mark not found".to_string()))?;

    state
        .marks
        .delete(mark.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mark not found".to_string()))?;
    tracing::info!(mark_id = mark.id, "Mark deleted.");
    Ok("Mark deleted successfully")
}

/// # GET /api/marks/student/:student_id/marks
pub async fn get_marks_by_student_id(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<i32>,
) -> Result<Json<Vec<MarkReportRow>>, AppError> {
    let marks = marks_of_student(&state, student_id).await?;
    if marks.is_empty() {
        return Err(AnalyticsError::EmptyInput.into());
    }
    Ok(Json(marks.iter().map(MarkReportRow::from).collect()))
}

/// # GET /api/marks/student/:student_id/details
/// Average, total and grade over every mark of the student.
pub async fn get_student_details(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<i32>,
) -> Result<Json<StudentDetails>, AppError> {
    let student = require_student(&state, student_id).await?;
    let marks = marks_of_student(&state, student_id).await?;
    let details = build_student_details(&student, &marks)?;
    Ok(Json(details))
}

/// # GET /api/marks/course/:course_id/highest
pub async fn get_highest_mark_for_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<i32>,
) -> Result<Json<CourseExtreme>, AppError> {
    require_course(&state, course_id).await?;
    let (marks, students) = marks_and_roster(&state).await?;
    let extreme = try_get_highest_mark_for_course(course_id, &marks, |id| students.get(&id))?;
    Ok(Json(extreme))
}

/// # GET /api/marks/course/:course_id/lowest
pub async fn get_lowest_mark_for_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<i32>,
) -> Result<Json<CourseExtreme>, AppError> {
    require_course(&state, course_id).await?;
    let (marks, students) = marks_and_roster(&state).await?;
    let extreme = try_get_lowest_mark_for_course(course_id, &marks, |id| students.get(&id))?;
    Ok(Json(extreme))
}

// ==============================================================================
// Lookups
// ==============================================================================

async fn require_student(state: &AppState, student_id: i32) -> Result<Student, AppError> {
    state
        .students
        .get_by_id(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
}

async fn require_course(state: &AppState, course_id: i32) -> Result<Course, AppError> {
    state
        .courses
        .get_by_id(course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
}

async fn marks_of_student(state: &AppState, student_id: i32) -> Result<Vec<Mark>, AppError> {
    let mut marks = state.marks.get_all().await?;
    marks.retain(|mark| mark.student_id == student_id);
    Ok(marks)
}

async fn find_mark(
    state: &AppState,
    student_id: i32,
    course_id: i32,
) -> Result<Option<Mark>, AppError> {
    let marks = state.marks.get_all().await?;
    Ok(marks
        .into_iter()
        .find(|mark| mark.belongs_to(student_id, course_id)))
}

/// Fetches every mark and every student concurrently. The two reads are not
/// a snapshot; a student removed in between surfaces as a data-integrity error.
async fn marks_and_roster(
    state: &AppState,
) -> Result<(Vec<Mark>, HashMap<i32, Student>), AppError> {
    let (marks, students) = tokio::join!(state.marks.get_all(), state.students.get_all());
    let roster = students?
        .into_iter()
        .map(|student| (student.id, student))
        .collect();
    Ok((marks?, roster))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use core_types::Grade;
    use rust_decimal::Decimal;

    struct Fixture {
        state: Arc<AppState>,
        ada: i32,
        grace: i32,
        algebra: i32,
        physics: i32,
    }

    async fn fixture() -> Fixture {
        let state = Arc::new(AppState::in_memory());
        let ada = state.students.create(&Student::new("Ada")).await.unwrap().id;
        let grace = state.students.create(&Student::new("Grace")).await.unwrap().id;
        let algebra = state
            .courses
            .create(&Course::new("Algebra", None))
            .await
            .unwrap()
            .id;
        let physics = state
            .courses
            .create(&Course::new("Physics", None))
            .await
            .unwrap()
            .id;
        Fixture {
            state,
            ada,
            grace,
            algebra,
            physics,
        }
    }

    async fn record(f: &Fixture, student_id: i32, course_id: i32, value: i32) -> i32 {
        let Json(id) = add_mark_for_student(
            State(f.state.clone()),
            Path((student_id, course_id)),
            Json(value),
        )
        .await
        .unwrap();
        id
    }

    #[tokio::test]
    async fn recording_requires_existing_student_and_course() {
        let f = fixture().await;

        let no_student =
            add_mark_for_student(State(f.state.clone()), Path((99, f.algebra)), Json(70))
                .await
                .unwrap_err();
        let no_course = add_mark_for_student(State(f.state.clone()), Path((f.ada, 99)), Json(70))
            .await
            .unwrap_err();

        assert_eq!(no_student.status(), StatusCode::NOT_FOUND);
        assert!(no_student.to_string().contains("Student"));
        assert_eq!(no_course.status(), StatusCode::NOT_FOUND);
        assert!(no_course.to_string().contains("Course"));
        assert!(f.state.marks.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_mark_for_same_pair_is_a_conflict() {
        let f = fixture().await;
        record(&f, f.ada, f.algebra, 70).await;

        let err = add_mark_for_student(State(f.state.clone()), Path((f.ada, f.algebra)), Json(75))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(f.state.marks.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_changes_value_and_keeps_creation_time() {
        let f = fixture().await;
        let id = record(&f, f.ada, f.algebra, 70).await;
        let before = f.state.marks.get_by_id(id).await.unwrap().unwrap();

        update_mark_for_student(State(f.state.clone()), Path((f.ada, f.algebra)), Json(93))
            .await
            .unwrap();

        let after = f.state.marks.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.mark_value, 93);
        assert_eq!(after.created_on, before.created_on);
        assert!(after.last_modified_on >= before.last_modified_on);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_mark_are_not_found() {
        let f = fixture().await;

        let update =
            update_mark_for_student(State(f.state.clone()), Path((f.ada, f.physics)), Json(50))
                .await
                .unwrap_err();
        let delete = delete_mark_for_student(State(f.state.clone()), Path((f.ada, f.physics)))
            .await
            .unwrap_err();

        assert_eq!(update.status(), StatusCode::NOT_FOUND);
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_only_the_pair() {
        let f = fixture().await;
        record(&f, f.ada, f.algebra, 70).await;
        let kept = record(&f, f.ada, f.physics, 80).await;

        delete_mark_for_student(State(f.state.clone()), Path((f.ada, f.algebra)))
            .await
            .unwrap();

        let remaining = f.state.marks.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);
    }

    #[tokio::test]
    async fn student_mark_listing_uses_stored_rows() {
        let f = fixture().await;
        record(&f, f.ada, f.algebra, 70).await;
        record(&f, f.ada, f.physics, 80).await;
        record(&f, f.grace, f.algebra, 90).await;

        let Json(rows) = get_marks_by_student_id(State(f.state.clone()), Path(f.ada))
            .await
            .unwrap();
        let stored = f.state.marks.get_all().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.student_id == f.ada));
        assert_eq!(rows[0].created_on, stored[0].created_on);

        let err = get_marks_by_student_id(State(f.state.clone()), Path(404))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn student_details_aggregate_marks() {
        let f = fixture().await;
        record(&f, f.ada, f.algebra, 70).await;
        record(&f, f.ada, f.physics, 91).await;

        let Json(details) = get_student_details(State(f.state.clone()), Path(f.ada))
            .await
            .unwrap();

        assert_eq!(details.student_name, "Ada");
        assert_eq!(details.total_marks, 161);
        assert_eq!(details.average_mark, Decimal::new(805, 1));
        assert_eq!(details.grade, Grade::B);
    }

    #[tokio::test]
    async fn student_details_need_a_student_with_marks() {
        let f = fixture().await;

        let unknown = get_student_details(State(f.state.clone()), Path(77))
            .await
            .unwrap_err();
        let no_marks = get_student_details(State(f.state.clone()), Path(f.grace))
            .await
            .unwrap_err();

        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert!(matches!(no_marks, AppError::Analytics(AnalyticsError::EmptyInput)));
        assert_eq!(no_marks.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn course_extremes_name_the_students() {
        let f = fixture().await;
        record(&f, f.ada, f.algebra, 60).await;
        record(&f, f.grace, f.algebra, 95).await;
        record(&f, f.grace, f.physics, 99).await;

        let Json(highest) = get_highest_mark_for_course(State(f.state.clone()), Path(f.algebra))
            .await
            .unwrap();
        let Json(lowest) = get_lowest_mark_for_course(State(f.state.clone()), Path(f.algebra))
            .await
            .unwrap();

        assert_eq!(highest.mark_value, 95);
        assert_eq!(highest.student_name, "Grace");
        assert_eq!(lowest.mark_value, 60);
        assert_eq!(lowest.student_name, "Ada");
    }

    #[tokio::test]
    async fn course_without_marks_reports_empty_extreme() {
        let f = fixture().await;
        let Json(highest) = get_highest_mark_for_course(State(f.state.clone()), Path(f.physics))
            .await
            .unwrap();
        assert!(highest.is_empty());

        let unknown = get_lowest_mark_for_course(State(f.state.clone()), Path(500))
            .await
            .unwrap_err();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleted_student_behind_a_mark_is_a_data_integrity_error() {
        let f = fixture().await;
        record(&f, f.grace, f.algebra, 88).await;
        f.state.students.delete(f.grace).await.unwrap();

        let err = get_highest_mark_for_course(State(f.state.clone()), Path(f.algebra))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Analytics(AnalyticsError::DataIntegrity(_))));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
