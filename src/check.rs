use crate::infra::build_service;
use clap::Args;
use placement_portal::error::AppError;
use placement_portal::placement::{
    unmet_criteria, EligibilityCriteria, ImportSummary, InstitutionId, StudentProfile,
};
use std::fmt::Write as _;
use std::fs::File;
use std::path::PathBuf;

const ROSTER_INSTITUTION: &str = "roster";

#[derive(Args, Debug)]
pub(crate) struct EligibilityCheckArgs {
    /// Student roster CSV, using the same columns as the import endpoint
    #[arg(long)]
    pub(crate) students: PathBuf,
    /// Minimum CGPA (0-10)
    #[arg(long)]
    pub(crate) min_cgpa: Option<f64>,
    /// Allowed branch; repeat for several. Omit to allow every branch
    #[arg(long)]
    pub(crate) branch: Vec<String>,
    /// Maximum number of active backlogs
    #[arg(long)]
    pub(crate) max_backlogs: Option<u32>,
    /// Minimum 10th percentage
    #[arg(long)]
    pub(crate) min_tenth: Option<f64>,
    /// Minimum 12th percentage
    #[arg(long)]
    pub(crate) min_twelfth: Option<f64>,
    /// Required graduation year
    #[arg(long)]
    pub(crate) graduation_year: Option<i32>,
}

impl EligibilityCheckArgs {
    fn criteria(&self) -> EligibilityCriteria {
        EligibilityCriteria {
            min_cgpa: self.min_cgpa,
            allowed_branches: (!self.branch.is_empty()).then(|| self.branch.clone()),
            max_active_backlogs: self.max_backlogs,
            min_tenth_percentage: self.min_tenth,
            min_twelfth_percentage: self.min_twelfth,
            graduation_year: self.graduation_year,
        }
    }
}

pub(crate) fn run_eligibility_check(args: EligibilityCheckArgs) -> Result<(), AppError> {
    let criteria = args.criteria();
    let roster = File::open(&args.students)?;

    let service = build_service();
    let institution = InstitutionId::from(ROSTER_INSTITUTION);
    let summary = service.import_students(&institution, roster)?;
    let students = service.students(&institution)?;

    print!(
        "{}",
        render_report(&args.students, &criteria, &summary, &students)
    );
    Ok(())
}

fn render_report(
    source: &std::path::Path,
    criteria: &EligibilityCriteria,
    summary: &ImportSummary,
    students: &[StudentProfile],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Eligibility check for {}", source.display());
    let _ = writeln!(out, "Criteria: {}", describe_criteria(criteria));
    let _ = writeln!(
        out,
        "Imported {} of {} rows ({} skipped)",
        summary.created, summary.total, summary.failed
    );
    for error in &summary.errors {
        let _ = writeln!(out, "  row {}: {}", error.row, error.message);
    }

    let verdicts: Vec<_> = students
        .iter()
        .map(|student| (student, unmet_criteria(student, Some(criteria))))
        .collect();
    let eligible = verdicts.iter().filter(|(_, unmet)| unmet.is_empty()).count();
    let _ = writeln!(out, "\nEligible: {} of {}", eligible, verdicts.len());

    for (student, unmet) in verdicts {
        let label = student
            .enrollment_no
            .as_deref()
            .unwrap_or_else(|| student.user_id.as_str());
        let name = student.full_name.as_deref().unwrap_or("-");
        let cgpa = student
            .cgpa
            .map_or_else(|| "n/a".to_string(), |cgpa| format!("{cgpa:.2}"));

        if unmet.is_empty() {
            let _ = writeln!(
                out,
                "- {label} {name} ({}, cgpa {cgpa}): eligible",
                student.branch
            );
        } else {
            let reasons: Vec<String> = unmet.iter().map(ToString::to_string).collect();
            let _ = writeln!(
                out,
                "- {label} {name} ({}, cgpa {cgpa}): not eligible ({})",
                student.branch,
                reasons.join("; ")
            );
        }
    }

    out
}

fn describe_criteria(criteria: &EligibilityCriteria) -> String {
    let mut parts = Vec::new();
    if let Some(min) = criteria.min_cgpa {
        parts.push(format!("minCGPA {min:.2}"));
    }
    if let Some(branches) = &criteria.allowed_branches {
        parts.push(format!("branches {}", branches.join(", ")));
    }
    if let Some(max) = criteria.max_active_backlogs {
        parts.push(format!("max backlogs {max}"));
    }
    if let Some(min) = criteria.min_tenth_percentage {
        parts.push(format!("10th >= {min:.1}%"));
    }
    if let Some(min) = criteria.min_twelfth_percentage {
        parts.push(format!("12th >= {min:.1}%"));
    }
    if let Some(year) = criteria.graduation_year {
        parts.push(format!("graduating {year}"));
    }

    if parts.is_empty() {
        "none (every student qualifies)".to_string()
    } else {
        parts.join(" | ")
    }
}
