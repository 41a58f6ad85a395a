//! Student grade calculator.
//!
//! Five subject marks → total, percentage (mean mark) and a letter grade
//! from the 90/80/70/60/50 thresholds.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::error::ViewerError;

pub const SUBJECTS: [&str; 5] = ["Math", "Physics", "Chemistry", "English", "Computer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::APlus
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::B
        } else if percentage >= 60.0 {
            Grade::C
        } else if percentage >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse one mark per subject. Blank, non-numeric and negative marks are
/// rejected.
pub fn parse_marks<S: AsRef<str>>(inputs: &[S]) -> Result<[f64; 5], ViewerError> {
    if inputs.len() != SUBJECTS.len() {
        return Err(ViewerError::InvalidInput(format!(
            "expected {} marks, got {}",
            SUBJECTS.len(),
            inputs.len()
        )));
    }

    let mut marks = [0.0; 5];
    for ((slot, raw), subject) in marks.iter_mut().zip(inputs).zip(SUBJECTS) {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(ViewerError::InvalidInput(format!("{subject} mark is empty")));
        }
        let value: f64 = raw.parse().map_err(|_| {
            ViewerError::InvalidInput(format!("{subject} mark '{raw}' is not a number"))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ViewerError::InvalidInput(format!(
                "{subject} mark must be a non-negative number"
            )));
        }
        *slot = value;
    }
    Ok(marks)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub marks: [f64; 5],
    pub total: f64,
    pub percentage: f64,
    pub grade: Grade,
}

impl GradeReport {
    pub fn calculate(marks: [f64; 5]) -> Self {
        let total: f64 = marks.iter().sum();
        let percentage = total / SUBJECTS.len() as f64;
        Self {
            marks,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }

    /// Plain-text report.
    pub fn write_report<W: Write>(&self, mut w: W) -> Result<(), ViewerError> {
        writeln!(w, "Student Grade Report")?;
        writeln!(w)?;
        for (subject, mark) in SUBJECTS.iter().zip(self.marks) {
            writeln!(w, "{subject}: {mark}")?;
        }
        writeln!(w)?;
        writeln!(w, "Total: {}", self.total)?;
        writeln!(w, "Percentage: {:.2}%", self.percentage)?;
        writeln!(w, "Grade: {}", self.grade)?;
        w.flush()?;
        Ok(())
    }
}
