use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::placement::domain::{
    Application, ApplicationId, ApplicationStatus, EligibilityCriteria, InstitutionId,
    Opportunity, OpportunityId, OpportunityType, RecruitmentRound, RoundType, StudentId,
    StudentProfile, UserId,
};
use crate::placement::input::{OpportunityInput, StudentProfileInput};
use crate::placement::memory::{InMemoryNotificationOutbox, InMemoryPlacementStore, MemoryTables};
use crate::placement::repository::{
    ApplicationRepository, FixedClock, NotificationError, NotificationPublisher,
    OpportunityRepository, PlacementNotification, PlacementStore, RepositoryError,
    StudentRepository,
};
use crate::placement::service::PlacementService;

pub(super) type MemoryService =
    PlacementService<InMemoryPlacementStore, InMemoryNotificationOutbox, FixedClock>;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 18, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn institution() -> InstitutionId {
    InstitutionId::from("inst-north")
}

pub(super) fn complete_profile_input() -> StudentProfileInput {
    StudentProfileInput {
        full_name: Some("Asha Rao".to_string()),
        enrollment_no: Some("EN-2026-001".to_string()),
        course: Some("BTech".to_string()),
        branch: Some("CS".to_string()),
        graduation_year: Some(2026),
        cgpa: Some(8.0),
        tenth_percentage: Some(91.0),
        twelfth_percentage: Some(88.5),
        active_backlogs: Some(0),
        resume_url: Some("https://files.example.edu/resumes/asha.pdf".to_string()),
    }
}

pub(super) fn cs_it_criteria() -> EligibilityCriteria {
    EligibilityCriteria {
        min_cgpa: Some(7.0),
        allowed_branches: Some(vec!["CS".to_string(), "IT".to_string()]),
        ..EligibilityCriteria::default()
    }
}

pub(super) fn opportunity_input(eligibility: Option<EligibilityCriteria>) -> OpportunityInput {
    OpportunityInput {
        company_name: "Acme Systems".to_string(),
        role_title: "Graduate Engineer".to_string(),
        opportunity_type: OpportunityType::Fulltime,
        location: Some("Pune".to_string()),
        ctc: Some("12".to_string()),
        description: None,
        last_date_to_apply: deadline(),
        eligibility,
        rounds: vec![
            RecruitmentRound {
                round_name: "Technical interview".to_string(),
                round_type: RoundType::Technical,
                round_order: 2,
            },
            RecruitmentRound {
                round_name: "Online test".to_string(),
                round_type: RoundType::Aptitude,
                round_order: 1,
            },
        ],
    }
}

/// Bare profile for pure eligibility checks; never persisted.
pub(super) fn profile(branch: &str, cgpa: Option<f64>) -> StudentProfile {
    StudentProfile {
        id: StudentId::from("stu-fixture"),
        user_id: UserId::from("user-fixture"),
        institution_id: institution(),
        full_name: None,
        enrollment_no: Some("EN-1".to_string()),
        course: Some("BTech".to_string()),
        branch: branch.to_string(),
        graduation_year: 2026,
        cgpa,
        tenth_percentage: Some(85.0),
        twelfth_percentage: Some(80.0),
        active_backlogs: 0,
        resume_url: Some("https://files.example.edu/r.pdf".to_string()),
        is_profile_complete: true,
        is_placed: false,
        placed_company: None,
        placed_role: None,
        placed_ctc: None,
        placement_type: None,
    }
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryPlacementStore>,
    Arc<InMemoryNotificationOutbox>,
) {
    let store = Arc::new(InMemoryPlacementStore::default());
    let outbox = Arc::new(InMemoryNotificationOutbox::default());
    let service = PlacementService::with_clock(
        store.clone(),
        outbox.clone(),
        Arc::new(FixedClock(now())),
    );
    (service, store, outbox)
}

pub(super) fn enroll<S, N>(
    service: &PlacementService<S, N, FixedClock>,
    user: &str,
    input: StudentProfileInput,
) -> StudentProfile
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
{
    service
        .upsert_student_profile(&UserId::from(user), &institution(), input)
        .expect("profile saved")
}

pub(super) fn post_opportunity<S, N>(
    service: &PlacementService<S, N, FixedClock>,
    eligibility: Option<EligibilityCriteria>,
) -> Opportunity
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
{
    service
        .create_opportunity(&institution(), opportunity_input(eligibility))
        .expect("opportunity created")
}

pub(super) fn apply_as<S, N>(
    service: &PlacementService<S, N, FixedClock>,
    user: &str,
    opportunity: &OpportunityId,
) -> Application
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
{
    service
        .apply(&UserId::from(user), opportunity)
        .expect("application accepted")
        .application
}

/// Enrolls a fresh student, applies, then walks the application along `path`.
pub(super) fn application_at<S, N>(
    service: &PlacementService<S, N, FixedClock>,
    user: &str,
    opportunity: &OpportunityId,
    path: &[ApplicationStatus],
) -> Application
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
{
    enroll(service, user, complete_profile_input());
    let mut application = apply_as(service, user, opportunity);
    for status in path {
        application = service
            .update_status(&application.id, *status, None)
            .expect("legal step");
    }
    application
}

pub(super) fn path_to(status: ApplicationStatus) -> &'static [ApplicationStatus] {
    use ApplicationStatus::*;

    match status {
        Applied => &[],
        Shortlisted => &[Shortlisted],
        Round1 => &[Shortlisted, Round1],
        Round2 => &[Shortlisted, Round1, Round2],
        Offered => &[Shortlisted, Round1, Offered],
        Rejected => &[Rejected],
    }
}

pub(super) fn stored_application(
    store: &InMemoryPlacementStore,
    id: &ApplicationId,
) -> Application {
    store
        .with_transaction(|work| work.application(id))
        .expect("lookup succeeds")
        .expect("application present")
}

pub(super) fn stored_student(store: &InMemoryPlacementStore, id: &StudentId) -> StudentProfile {
    store
        .with_transaction(|work| work.student(id))
        .expect("lookup succeeds")
        .expect("student present")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Outbox that always refuses to enqueue.
#[derive(Default)]
pub(super) struct FailingOutbox;

impl NotificationPublisher for FailingOutbox {
    fn publish(&self, _notification: PlacementNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("queue offline".to_string()))
    }
}

/// Store whose student writes can be switched off to exercise rollback.
#[derive(Default)]
pub(super) struct FlakyStore {
    tables: Mutex<MemoryTables>,
    fail_student_saves: AtomicBool,
}

impl FlakyStore {
    pub(super) fn fail_student_saves(&self) {
        self.fail_student_saves.store(true, Ordering::SeqCst);
    }

    pub(super) fn snapshot(&self) -> MemoryTables {
        self.tables.lock().expect("tables mutex poisoned").clone()
    }
}

impl PlacementStore for FlakyStore {
    type Work = FlakyWork;

    fn with_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Work) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.tables.lock().expect("tables mutex poisoned");
        let mut draft = FlakyWork {
            tables: guard.clone(),
            fail_student_saves: self.fail_student_saves.load(Ordering::SeqCst),
        };
        let output = work(&mut draft)?;
        *guard = draft.tables;
        Ok(output)
    }
}

pub(super) struct FlakyWork {
    tables: MemoryTables,
    fail_student_saves: bool,
}

impl StudentRepository for FlakyWork {
    fn student(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        self.tables.student(id)
    }

    fn student_by_user(&self, user: &UserId) -> Result<Option<StudentProfile>, RepositoryError> {
        self.tables.student_by_user(user)
    }

    fn students_in(
        &self,
        institution: &InstitutionId,
    ) -> Result<Vec<StudentProfile>, RepositoryError> {
        self.tables.students_in(institution)
    }

    fn insert_student(&mut self, profile: StudentProfile) -> Result<(), RepositoryError> {
        self.tables.insert_student(profile)
    }

    fn save_student(&mut self, profile: StudentProfile) -> Result<(), RepositoryError> {
        if self.fail_student_saves {
            return Err(RepositoryError::Unavailable("student table locked".to_string()));
        }
        self.tables.save_student(profile)
    }
}

impl OpportunityRepository for FlakyWork {
    fn opportunity(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError> {
        self.tables.opportunity(id)
    }

    fn opportunities_in(
        &self,
        institution: &InstitutionId,
    ) -> Result<Vec<Opportunity>, RepositoryError> {
        self.tables.opportunities_in(institution)
    }

    fn insert_opportunity(&mut self, opportunity: Opportunity) -> Result<(), RepositoryError> {
        self.tables.insert_opportunity(opportunity)
    }

    fn save_opportunity(&mut self, opportunity: Opportunity) -> Result<(), RepositoryError> {
        self.tables.save_opportunity(opportunity)
    }
}

impl ApplicationRepository for FlakyWork {
    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        self.tables.application(id)
    }

    fn application_for(
        &self,
        student: &StudentId,
        opportunity: &OpportunityId,
    ) -> Result<Option<Application>, RepositoryError> {
        self.tables.application_for(student, opportunity)
    }

    fn applications_by_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.tables.applications_by_student(student)
    }

    fn applications_by_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.tables.applications_by_opportunity(opportunity)
    }

    fn insert_application(&mut self, application: Application) -> Result<(), RepositoryError> {
        self.tables.insert_application(application)
    }

    fn save_application(&mut self, application: Application) -> Result<(), RepositoryError> {
        self.tables.save_application(application)
    }
}

/// Store that is never reachable.
pub(super) struct UnavailableStore;

impl PlacementStore for UnavailableStore {
    type Work = MemoryTables;

    fn with_transaction<T, E, F>(&self, _work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Work) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }
}
