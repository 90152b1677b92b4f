use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, InstitutionId, Opportunity, OpportunityId, StudentId,
    StudentProfile, UserId,
};

/// Student profile persistence.
pub trait StudentRepository {
    fn student(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError>;
    fn student_by_user(&self, user: &UserId) -> Result<Option<StudentProfile>, RepositoryError>;
    fn students_in(&self, institution: &InstitutionId)
        -> Result<Vec<StudentProfile>, RepositoryError>;
    /// Fails with `Conflict` when the user already owns a profile.
    fn insert_student(&mut self, profile: StudentProfile) -> Result<(), RepositoryError>;
    fn save_student(&mut self, profile: StudentProfile) -> Result<(), RepositoryError>;
}

/// Opportunity persistence, including its criteria and rounds.
pub trait OpportunityRepository {
    fn opportunity(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError>;
    fn opportunities_in(
        &self,
        institution: &InstitutionId,
    ) -> Result<Vec<Opportunity>, RepositoryError>;
    fn insert_opportunity(&mut self, opportunity: Opportunity) -> Result<(), RepositoryError>;
    fn save_opportunity(&mut self, opportunity: Opportunity) -> Result<(), RepositoryError>;
}

/// Application persistence keyed by id and by the (student, opportunity) pair.
pub trait ApplicationRepository {
    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn application_for(
        &self,
        student: &StudentId,
        opportunity: &OpportunityId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn applications_by_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn applications_by_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<Application>, RepositoryError>;
    /// Fails with `Conflict` when the (student, opportunity) pair already has an application.
    fn insert_application(&mut self, application: Application) -> Result<(), RepositoryError>;
    fn save_application(&mut self, application: Application) -> Result<(), RepositoryError>;
}

/// Every repository reachable inside one transaction.
pub trait UnitOfWork: StudentRepository + OpportunityRepository + ApplicationRepository {}

impl<T> UnitOfWork for T where T: StudentRepository + OpportunityRepository + ApplicationRepository
{}

/// Storage abstraction so the service can be exercised against in-memory fakes.
///
/// `with_transaction` commits the work only when the closure returns `Ok`; any error
/// discards every write made inside it.
pub trait PlacementStore: Send + Sync {
    type Work: UnitOfWork;

    fn with_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Work) -> Result<T, E>,
        E: From<RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Source of the current time for deadline checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Outbound notification queue. Delivery is best effort; callers never wait on it.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: PlacementNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Shortlisted,
    InterviewScheduled,
    OfferReceived,
    Rejected,
    NewOpportunity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementNotification {
    pub kind: NotificationKind,
    pub recipient: StudentId,
    pub opportunity_id: OpportunityId,
    pub application_id: Option<ApplicationId>,
    pub title: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification queue unavailable: {0}")]
    Transport(String),
}
