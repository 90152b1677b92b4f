use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationStatus, EligibilityCriteria, OpportunityStatus, OpportunityType,
    RecruitmentRound,
};
use super::service::PlacementError;

/// Self-service profile fields. Absent fields keep their stored value on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub enrollment_no: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub tenth_percentage: Option<f64>,
    #[serde(default)]
    pub twelfth_percentage: Option<f64>,
    #[serde(default)]
    pub active_backlogs: Option<u32>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl StudentProfileInput {
    pub(crate) fn validate(&self) -> Result<(), PlacementError> {
        if let Some(cgpa) = self.cgpa {
            check_range("cgpa", cgpa, 10.0)?;
        }
        if let Some(tenth) = self.tenth_percentage {
            check_range("tenthPercentage", tenth, 100.0)?;
        }
        if let Some(twelfth) = self.twelfth_percentage {
            check_range("twelfthPercentage", twelfth, 100.0)?;
        }
        if let Some(branch) = &self.branch {
            if branch.trim().is_empty() {
                return Err(PlacementError::Validation("branch must not be blank".into()));
            }
        }
        Ok(())
    }
}

/// Opportunity definition submitted by a placement officer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityInput {
    pub company_name: String,
    pub role_title: String,
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub ctc: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub last_date_to_apply: DateTime<Utc>,
    #[serde(default)]
    pub eligibility: Option<EligibilityCriteria>,
    #[serde(default)]
    pub rounds: Vec<RecruitmentRound>,
}

impl OpportunityInput {
    pub(crate) fn validate(&self) -> Result<(), PlacementError> {
        if self.company_name.trim().is_empty() {
            return Err(PlacementError::Validation("companyName must not be blank".into()));
        }
        if self.role_title.trim().is_empty() {
            return Err(PlacementError::Validation("roleTitle must not be blank".into()));
        }

        if let Some(criteria) = &self.eligibility {
            if let Some(min_cgpa) = criteria.min_cgpa {
                check_range("minCGPA", min_cgpa, 10.0)?;
            }
            if let Some(tenth) = criteria.min_tenth_percentage {
                check_range("minTenthPercentage", tenth, 100.0)?;
            }
            if let Some(twelfth) = criteria.min_twelfth_percentage {
                check_range("minTwelfthPercentage", twelfth, 100.0)?;
            }
        }

        let mut orders: Vec<u32> = self.rounds.iter().map(|round| round.round_order).collect();
        orders.sort_unstable();
        if orders.first() == Some(&0) {
            return Err(PlacementError::Validation("roundOrder starts at 1".into()));
        }
        if let Some(pair) = orders.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(PlacementError::Validation(format!(
                "roundOrder {} used more than once",
                pair[0]
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityFilter {
    #[serde(default)]
    pub status: Option<OpportunityStatus>,
    #[serde(default, rename = "type")]
    pub opportunity_type: Option<OpportunityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub current_round: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusUpdate {
    pub application_ids: Vec<ApplicationId>,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub application_id: ApplicationId,
    #[serde(default)]
    pub ctc: Option<String>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub offer_letter_url: Option<String>,
}

/// Result of a bulk status change; every row is validated on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusOutcome {
    pub count: usize,
    pub failures: Vec<BulkStatusFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusFailure {
    pub application_id: ApplicationId,
    pub kind: &'static str,
    pub error: String,
}

fn check_range(field: &str, value: f64, max: f64) -> Result<(), PlacementError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlacementError::Validation(format!(
            "{field} must be between 0 and {max}"
        )))
    }
}
