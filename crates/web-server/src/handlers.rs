use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use core_types::{Course, Student};
use std::sync::Arc;

// ==============================================================================
// Students
// ==============================================================================

/// # GET /api/students
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.students.get_all().await?;
    Ok(Json(students))
}

/// # POST /api/students
/// Stores a new student and returns the assigned id.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(student): Json<Student>,
) -> Result<Json<i32>, AppError> {
    let created = state.students.create(&student).await?;
    tracing::debug!(student_id = created.id, "Student created.");
    Ok(Json(created.id))
}

/// # GET /api/students/:id
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .students
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(student))
}

/// # PUT /api/students/:id
/// Replaces every field of the student; returns its id.
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(student): Json<Student>,
) -> Result<Json<i32>, AppError> {
    let updated = state.students.update(id, &student).await?;
    Ok(Json(updated.id))
}

/// # DELETE /api/students/:id
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<i32>, AppError> {
    let deleted = state
        .students
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    tracing::debug!(student_id = deleted.id, "Student deleted.");
    Ok(Json(deleted.id))
}

// ==============================================================================
// Courses
// ==============================================================================

/// # GET /api/courses
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.courses.get_all().await?;
    Ok(Json(courses))
}

/// # POST /api/courses
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    Json(course): Json<Course>,
) -> Result<Json<i32>, AppError> {
    let created = state.courses.create(&course).await?;
    tracing::debug!(course_id = created.id, "Course created.");
    Ok(Json(created.id))
}

/// # GET /api/courses/:id
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Course>, AppError> {
    let course = state
        .courses
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(Json(course))
}

/// # PUT /api/courses/:id
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(course): Json<Course>,
) -> Result<Json<i32>, AppError> {
    let updated = state.courses.update(id, &course).await?;
    Ok(Json(updated.id))
}

/// # DELETE /api/courses/:id
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<i32>, AppError> {
    let deleted = state
        .courses
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(Json(deleted.id))
}
