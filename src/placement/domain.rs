use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Account that owns a student profile; supplied by the authentication layer.
    UserId
);
string_id!(InstitutionId);
string_id!(StudentId);
string_id!(OpportunityId);
string_id!(ApplicationId);

/// Academic and placement snapshot for one student account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: StudentId,
    pub user_id: UserId,
    pub institution_id: InstitutionId,
    pub full_name: Option<String>,
    pub enrollment_no: Option<String>,
    pub course: Option<String>,
    pub branch: String,
    pub graduation_year: i32,
    pub cgpa: Option<f64>,
    pub tenth_percentage: Option<f64>,
    pub twelfth_percentage: Option<f64>,
    pub active_backlogs: u32,
    pub resume_url: Option<String>,
    pub is_profile_complete: bool,
    pub is_placed: bool,
    pub placed_company: Option<String>,
    pub placed_role: Option<String>,
    pub placed_ctc: Option<String>,
    pub placement_type: Option<PlacementType>,
}

impl StudentProfile {
    /// Every field a recruiter needs before the student may apply anywhere.
    pub fn compute_completeness(&self) -> bool {
        fn filled(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|inner| !inner.trim().is_empty())
        }

        filled(&self.enrollment_no)
            && filled(&self.course)
            && !self.branch.trim().is_empty()
            && self.graduation_year > 0
            && self.cgpa.is_some()
            && self.tenth_percentage.is_some()
            && self.twelfth_percentage.is_some()
            && filled(&self.resume_url)
    }

    pub fn has_resume(&self) -> bool {
        self.resume_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub(crate) fn record_placement(&mut self, opportunity: &Opportunity, offer: &OfferDetails) {
        self.is_placed = true;
        self.placed_company = Some(opportunity.company_name.clone());
        self.placed_role = Some(opportunity.role_title.clone());
        self.placed_ctc = offer.ctc.clone().or_else(|| opportunity.ctc.clone());
        self.placement_type = Some(opportunity.opportunity_type.placement_type());
    }
}

/// Optional thresholds an opportunity imposes; an absent field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCriteria {
    #[serde(default, rename = "minCGPA")]
    pub min_cgpa: Option<f64>,
    #[serde(default)]
    pub allowed_branches: Option<Vec<String>>,
    #[serde(default)]
    pub max_active_backlogs: Option<u32>,
    #[serde(default)]
    pub min_tenth_percentage: Option<f64>,
    #[serde(default)]
    pub min_twelfth_percentage: Option<f64>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpportunityStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpportunityType {
    Internship,
    #[serde(alias = "FULL_TIME")]
    Fulltime,
}

impl OpportunityType {
    pub const fn placement_type(self) -> PlacementType {
        match self {
            OpportunityType::Internship => PlacementType::Internship,
            OpportunityType::Fulltime => PlacementType::Fulltime,
        }
    }
}

/// Marker copied onto the student profile when an offer is finalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementType {
    Internship,
    Fulltime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundType {
    Aptitude,
    Coding,
    Technical,
    GroupDiscussion,
    Hr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentRound {
    pub round_name: String,
    pub round_type: RoundType,
    pub round_order: u32,
}

/// Job or internship posting scoped to one institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: OpportunityId,
    pub institution_id: InstitutionId,
    pub company_name: String,
    pub role_title: String,
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    pub location: Option<String>,
    pub ctc: Option<String>,
    pub description: Option<String>,
    pub last_date_to_apply: DateTime<Utc>,
    pub status: OpportunityStatus,
    pub eligibility: Option<EligibilityCriteria>,
    pub rounds: Vec<RecruitmentRound>,
    pub created_at: DateTime<Utc>,
}

impl Opportunity {
    /// Open and still before its deadline.
    pub fn accepts_applications_at(&self, now: DateTime<Utc>) -> bool {
        self.status == OpportunityStatus::Open && now < self.last_date_to_apply
    }

    pub fn summary(&self) -> OpportunitySummary {
        OpportunitySummary {
            company_name: self.company_name.clone(),
            role_title: self.role_title.clone(),
            opportunity_type: self.opportunity_type,
        }
    }
}

/// Minimal opportunity description returned alongside an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunitySummary {
    pub company_name: String,
    pub role_title: String,
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
}

/// Status tracked for an application from submission to a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Round1,
    Round2,
    Offered,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Round1,
        ApplicationStatus::Round2,
        ApplicationStatus::Offered,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Round1 => "ROUND1",
            ApplicationStatus::Round2 => "ROUND2",
            ApplicationStatus::Offered => "OFFERED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Offer terms attached when an application reaches OFFERED.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetails {
    pub ctc: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub offer_letter_url: Option<String>,
}

/// One student's application to one opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub opportunity_id: OpportunityId,
    pub status: ApplicationStatus,
    pub current_round: Option<u32>,
    pub offer: Option<OfferDetails>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application enriched with the opportunity it targets, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub opportunity: OpportunitySummary,
}
