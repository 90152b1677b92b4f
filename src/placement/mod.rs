//! Eligibility evaluation and application lifecycle for campus placement drives.
//!
//! `eligibility` decides whether a profile satisfies an opportunity's criteria. The
//! `service` module owns every mutation: it gates applications on profile completeness,
//! deadline, eligibility and uniqueness, and walks applications through the status graph in
//! `lifecycle`, recording the placement on the student profile in the same transaction when
//! an offer is made.

pub mod domain;
pub mod eligibility;
pub mod import;
pub mod input;
pub mod lifecycle;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationView, EligibilityCriteria,
    InstitutionId, OfferDetails, Opportunity, OpportunityId, OpportunityStatus,
    OpportunitySummary, OpportunityType, PlacementType, RecruitmentRound, RoundType, StudentId,
    StudentProfile, UserId,
};
pub use eligibility::{is_eligible, unmet_criteria, UnmetCriterion};
pub use import::{ImportRowError, ImportSummary, StudentImportError};
pub use input::{
    BulkStatusFailure, BulkStatusOutcome, BulkStatusUpdate, OfferRequest, OpportunityFilter,
    OpportunityInput, StatusUpdate, StudentProfileInput,
};
pub use memory::{InMemoryNotificationOutbox, InMemoryPlacementStore, MemoryTables};
pub use repository::{
    ApplicationRepository, Clock, FixedClock, NotificationError, NotificationKind,
    NotificationPublisher, OpportunityRepository, PlacementNotification, PlacementStore,
    RepositoryError, StudentRepository, SystemClock, UnitOfWork,
};
pub use router::placement_router;
pub use service::{PlacementError, PlacementService};
pub use stats::{BranchPlacement, CompanyPlacement, PlacementStats};
