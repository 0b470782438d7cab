//! Grade scales: marks to grade point, score to letter, score to message.
//!
//! Every table is closed below: a value sitting exactly on a threshold
//! belongs to that threshold's bucket.

/// Highest grade point on the scale.
pub const MAX_GRADE_POINT: f64 = 4.0;

/// `(minimum marks, grade point)` in descending order.
pub const GRADE_POINT_TABLE: &[(f64, f64)] = &[
    (85.0, 4.0),
    (80.0, 3.7),
    (75.0, 3.3),
    (70.0, 3.0),
    (65.0, 2.7),
    (61.0, 2.3),
    (58.0, 2.0),
    (55.0, 1.7),
    (50.0, 1.0),
];

/// `(minimum score, letter)` in descending order.
pub const GRADE_LETTER_TABLE: &[(f64, &str)] = &[
    (3.7, "A"),
    (3.3, "A-"),
    (3.0, "B+"),
    (2.7, "B"),
    (2.3, "B-"),
    (2.0, "C+"),
    (1.7, "C"),
    (1.0, "D"),
];

/// Letter for anything below the last threshold.
pub const FAILING_LETTER: &str = "F";

const MESSAGE_BANDS: &[(f64, &str)] = &[
    (3.8, "🎉 Outstanding! You're at the top of your game!"),
    (3.5, "🔥 Excellent work! Keep up the momentum!"),
    (3.0, "😎 Good job! You're on the right track!"),
    (2.5, "💪 Keep pushing! You can improve further!"),
    (2.0, "📚 Focus and work harder - you've got this!"),
];

const LOWEST_BAND_MESSAGE: &str = "🚀 Time to level up! Every effort counts!";

/// Map a percentage mark to a grade point.
///
/// No range check is done here: anything below 50 maps to 0.0 and anything
/// from 85 up maps to 4.0.
pub fn grade_point(marks: f64) -> f64 {
    GRADE_POINT_TABLE
        .iter()
        .find(|(min, _)| marks >= *min)
        .map(|(_, point)| *point)
        .unwrap_or(0.0)
}

/// Map a GPA or CGPA to its letter grade.
pub fn grade_letter(score: f64) -> &'static str {
    GRADE_LETTER_TABLE
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, letter)| *letter)
        .unwrap_or(FAILING_LETTER)
}

/// Motivational message for a score, in six descending bands.
pub fn motivational_message(score: f64) -> &'static str {
    MESSAGE_BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, msg)| *msg)
        .unwrap_or(LOWEST_BAND_MESSAGE)
}
