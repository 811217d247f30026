use crate::engine::{calculate_average, calculate_sum, get_grade};
use crate::error::AnalyticsError;
use core_types::{Mark, Student, StudentDetails};

/// Builds the average/total/grade summary for one student.
///
/// `marks` must already be narrowed to `student` by the caller; a mark owned by
/// anyone else is reported as inconsistent data rather than silently counted.
pub fn build_student_details(
    student: &Student,
    marks: &[Mark],
) -> Result<StudentDetails, AnalyticsError> {
    if let Some(stray) = marks.iter().find(|mark| mark.student_id != student.id) {
        return Err(AnalyticsError::DataIntegrity(format!(
            "mark {} belongs to student {}, not {}",
            stray.id, stray.student_id, student.id
        )));
    }

    let values: Vec<i32> = marks.iter().map(|mark| mark.mark_value).collect();
    let average_mark = calculate_average(&values)?;

    Ok(StudentDetails {
        student_id: student.id,
        student_name: student.student_name.clone(),
        average_mark,
        total_marks: calculate_sum(&values),
        grade: get_grade(average_mark),
    })
}
