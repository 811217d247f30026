use crate::error::AnalyticsError;
use core_types::{CourseExtreme, Grade, Mark, Student};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Lower bounds of each passing grade, checked top-down. Anything below the
/// last bound is an `F`.
const GRADE_THRESHOLDS: [(i64, Grade); 5] = [
    (90, Grade::A),
    (80, Grade::B),
    (70, Grade::C),
    (60, Grade::D),
    (50, Grade::E),
];

/// Averages a list of mark values.
///
/// The integer sum is computed first and then divided by the count as a
/// `Decimal`, so `[70, 71]` gives `70.5` rather than a truncated `70`.
///
/// # Errors
///
/// Returns `AnalyticsError::EmptyInput` when `values` is empty.
pub fn calculate_average(values: &[i32]) -> Result<Decimal, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let sum = Decimal::from(calculate_sum(values));
    let count = Decimal::from(values.len());
    Ok(sum / count)
}

/// Sums a list of mark values. An empty list sums to `0`.
pub fn calculate_sum(values: &[i32]) -> i64 {
    values.iter().map(|&value| i64::from(value)).sum()
}

/// Maps an average onto its grade letter.
pub fn get_grade(average: Decimal) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(bound, _)| average >= Decimal::from(*bound))
        .map(|&(_, grade)| grade)
        .unwrap_or(Grade::F)
}

/// Finds the highest mark recorded for `course_id` and the name of the student
/// who earned it.
///
/// On ties the first mark in `marks` wins. A course without marks yields
/// `CourseExtreme::default()`.
///
/// # Errors
///
/// Returns `AnalyticsError::DataIntegrity` when `lookup` cannot resolve the
/// owning student.
pub fn try_get_highest_mark_for_course<'a, F>(
    course_id: i32,
    marks: &[Mark],
    lookup: F,
) -> Result<CourseExtreme, AnalyticsError>
where
    F: Fn(i32) -> Option<&'a Student>,
{
    course_extreme(course_id, marks, lookup, Ordering::Greater)
}

/// Finds the lowest mark recorded for `course_id`. Same tie-break and errors as
/// [`try_get_highest_mark_for_course`].
pub fn try_get_lowest_mark_for_course<'a, F>(
    course_id: i32,
    marks: &[Mark],
    lookup: F,
) -> Result<CourseExtreme, AnalyticsError>
where
    F: Fn(i32) -> Option<&'a Student>,
{
    course_extreme(course_id, marks, lookup, Ordering::Less)
}

/// Picks the mark whose value compares as `wanted` against every other mark of
/// the course. A later mark only replaces the current pick when it is strictly
/// better, which keeps the first one on ties.
fn course_extreme<'a, F>(
    course_id: i32,
    marks: &[Mark],
    lookup: F,
    wanted: Ordering,
) -> Result<CourseExtreme, AnalyticsError>
where
    F: Fn(i32) -> Option<&'a Student>,
{
    let selected = marks
        .iter()
        .filter(|mark| mark.course_id == course_id)
        .fold(None::<&Mark>, |best, mark| match best {
            Some(current) if mark.mark_value.cmp(&current.mark_value) != wanted => Some(current),
            _ => Some(mark),
        });

    let Some(mark) = selected else {
        return Ok(CourseExtreme::default());
    };

    let student = lookup(mark.student_id).ok_or_else(|| {
        AnalyticsError::DataIntegrity(format!(
            "mark {} in course {} references missing student {}",
            mark.id, course_id, mark.student_id
        ))
    })?;

    Ok(CourseExtreme {
        mark_value: mark.mark_value,
        student_name: student.student_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn mark(id: i32, student_id: i32, course_id: i32, mark_value: i32) -> Mark {
        Mark {
            id,
            ..Mark::new(student_id, course_id, mark_value, Utc::now())
        }
    }

    fn roster() -> HashMap<i32, Student> {
        [(1, "Ada"), (2, "Grace"), (3, "Edsger")]
            .into_iter()
            .map(|(id, name)| {
                (
                    id,
                    Student {
                        id,
                        student_name: name.to_string(),
                    },
                )
            })
            .collect()
    }

    fn sample_marks() -> Vec<Mark> {
        vec![mark(1, 1, 5, 60), mark(2, 2, 5, 95), mark(3, 3, 9, 99)]
    }

    #[test]
    fn average_of_empty_input_fails() {
        assert_eq!(calculate_average(&[]), Err(AnalyticsError::EmptyInput));
    }

    #[test]
    fn average_of_whole_numbers() {
        assert_eq!(calculate_average(&[70, 80, 90]).unwrap(), dec!(80));
    }

    #[test]
    fn average_keeps_fractional_part() {
        assert_eq!(calculate_average(&[70, 71]).unwrap(), dec!(70.5));
        assert_eq!(calculate_average(&[1, 2, 2, 2]).unwrap(), dec!(1.75));
    }

    #[test]
    fn average_does_not_overflow_on_large_values() {
        let values = [i32::MAX, i32::MAX];
        assert_eq!(calculate_average(&values).unwrap(), Decimal::from(i32::MAX));
    }

    #[test]
    fn sum_of_empty_input_is_zero() {
        assert_eq!(calculate_sum(&[]), 0);
    }

    #[test]
    fn sum_of_values() {
        assert_eq!(calculate_sum(&[70, 80, 90]), 240);
    }

    #[test]
    fn grade_ladder_boundaries() {
        assert_eq!(get_grade(dec!(90)), Grade::A);
        assert_eq!(get_grade(dec!(100)), Grade::A);
        assert_eq!(get_grade(dec!(89.999)), Grade::B);
        assert_eq!(get_grade(dec!(80)), Grade::B);
        assert_eq!(get_grade(dec!(79.5)), Grade::C);
        assert_eq!(get_grade(dec!(60)), Grade::D);
        assert_eq!(get_grade(dec!(50)), Grade::E);
        assert_eq!(get_grade(dec!(49.99)), Grade::F);
        assert_eq!(get_grade(dec!(49)), Grade::F);
        assert_eq!(get_grade(dec!(-3)), Grade::F);
    }

    #[test]
    fn highest_mark_for_course_names_the_student() {
        let students = roster();
        let extreme =
            try_get_highest_mark_for_course(5, &sample_marks(), |id| students.get(&id)).unwrap();

        assert_eq!(extreme.mark_value, 95);
        assert_eq!(extreme.student_name, "Grace");
    }

    #[test]
    fn lowest_mark_for_course_names_the_student() {
        let students = roster();
        let extreme =
            try_get_lowest_mark_for_course(5, &sample_marks(), |id| students.get(&id)).unwrap();

        assert_eq!(extreme.mark_value, 60);
        assert_eq!(extreme.student_name, "Ada");
    }

    #[test]
    fn course_without_marks_yields_empty_result() {
        let students = roster();
        let highest =
            try_get_highest_mark_for_course(42, &sample_marks(), |id| students.get(&id)).unwrap();
        let lowest =
            try_get_lowest_mark_for_course(42, &sample_marks(), |id| students.get(&id)).unwrap();

        assert_eq!(highest, CourseExtreme::default());
        assert_eq!(lowest.mark_value, 0);
        assert_eq!(lowest.student_name, "");
    }

    #[test]
    fn ties_resolve_to_first_mark_in_input_order() {
        let students = roster();
        let marks = vec![
            mark(1, 3, 7, 88),
            mark(2, 1, 7, 88),
            mark(3, 2, 7, 40),
            mark(4, 1, 7, 40),
        ];

        let highest = try_get_highest_mark_for_course(7, &marks, |id| students.get(&id)).unwrap();
        let lowest = try_get_lowest_mark_for_course(7, &marks, |id| students.get(&id)).unwrap();

        assert_eq!(highest.student_name, "Edsger");
        assert_eq!(lowest.student_name, "Grace");
    }

    #[test]
    fn missing_student_is_a_data_integrity_error() {
        let marks = vec![mark(11, 77, 5, 70)];
        let err = try_get_highest_mark_for_course(5, &marks, |_| None).unwrap_err();

        match err {
            AnalyticsError::DataIntegrity(message) => assert!(message.contains("77")),
            other => panic!("expected DataIntegrity, got {other:?}"),
        }
    }

    #[test]
    fn lookup_is_not_consulted_for_empty_course() {
        let marks = vec![mark(1, 77, 5, 70)];
        let extreme = try_get_lowest_mark_for_course(6, &marks, |_| None).unwrap();
        assert!(extreme.is_empty());
    }
}
