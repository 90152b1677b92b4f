//! Eligibility evaluation for opportunity criteria.
//!
//! Every dimension is checked independently and the verdict is the conjunction of all of
//! them. Missing criteria, or a criterion left unset, never excludes a student.

use std::fmt;

use serde::Serialize;

use super::domain::{EligibilityCriteria, StudentProfile};

/// One criterion the student failed to meet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "criterion", rename_all = "snake_case")]
pub enum UnmetCriterion {
    MinCgpa { required: f64, actual: Option<f64> },
    Branch { allowed: Vec<String>, actual: String },
    MaxActiveBacklogs { allowed: u32, actual: u32 },
    MinTenthPercentage { required: f64, actual: Option<f64> },
    MinTwelfthPercentage { required: f64, actual: Option<f64> },
    GraduationYear { required: i32, actual: i32 },
}

impl fmt::Display for UnmetCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmetCriterion::MinCgpa { required, actual } => match actual {
                Some(actual) => write!(f, "cgpa {actual:.2} below minimum {required:.2}"),
                None => write!(f, "cgpa missing (minimum {required:.2})"),
            },
            UnmetCriterion::Branch { allowed, actual } => {
                write!(f, "branch {actual} not in [{}]", allowed.join(", "))
            }
            UnmetCriterion::MaxActiveBacklogs { allowed, actual } => {
                write!(f, "{actual} active backlog(s) exceeds allowance {allowed}")
            }
            UnmetCriterion::MinTenthPercentage { required, actual } => match actual {
                Some(actual) => write!(f, "10th {actual:.1}% below minimum {required:.1}%"),
                None => write!(f, "10th percentage missing (minimum {required:.1}%)"),
            },
            UnmetCriterion::MinTwelfthPercentage { required, actual } => match actual {
                Some(actual) => write!(f, "12th {actual:.1}% below minimum {required:.1}%"),
                None => write!(f, "12th percentage missing (minimum {required:.1}%)"),
            },
            UnmetCriterion::GraduationYear { required, actual } => {
                write!(f, "graduation year {actual} does not match {required}")
            }
        }
    }
}

/// Lists every criterion the student fails. Empty means eligible.
pub fn unmet_criteria(
    student: &StudentProfile,
    criteria: Option<&EligibilityCriteria>,
) -> Vec<UnmetCriterion> {
    let Some(criteria) = criteria else {
        return Vec::new();
    };
    let mut unmet = Vec::new();

    if let Some(required) = criteria.min_cgpa {
        if below(student.cgpa, required) {
            unmet.push(UnmetCriterion::MinCgpa {
                required,
                actual: student.cgpa,
            });
        }
    }

    if let Some(allowed) = criteria
        .allowed_branches
        .as_ref()
        .filter(|branches| !branches.is_empty())
    {
        if !allowed.iter().any(|branch| branch == &student.branch) {
            unmet.push(UnmetCriterion::Branch {
                allowed: allowed.clone(),
                actual: student.branch.clone(),
            });
        }
    }

    if let Some(allowed) = criteria.max_active_backlogs {
        if student.active_backlogs > allowed {
            unmet.push(UnmetCriterion::MaxActiveBacklogs {
                allowed,
                actual: student.active_backlogs,
            });
        }
    }

    if let Some(required) = criteria.min_tenth_percentage {
        if below(student.tenth_percentage, required) {
            unmet.push(UnmetCriterion::MinTenthPercentage {
                required,
                actual: student.tenth_percentage,
            });
        }
    }

    if let Some(required) = criteria.min_twelfth_percentage {
        if below(student.twelfth_percentage, required) {
            unmet.push(UnmetCriterion::MinTwelfthPercentage {
                required,
                actual: student.twelfth_percentage,
            });
        }
    }

    if let Some(required) = criteria.graduation_year {
        if student.graduation_year != required {
            unmet.push(UnmetCriterion::GraduationYear {
                required,
                actual: student.graduation_year,
            });
        }
    }

    unmet
}

pub fn is_eligible(student: &StudentProfile, criteria: Option<&EligibilityCriteria>) -> bool {
    unmet_criteria(student, criteria).is_empty()
}

// A missing score never satisfies a threshold.
fn below(actual: Option<f64>, required: f64) -> bool {
    match actual {
        Some(value) => value < required,
        None => true,
    }
}
