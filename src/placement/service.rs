use std::collections::BTreeMap;
use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationView, InstitutionId, OfferDetails,
    Opportunity, OpportunityId, OpportunityStatus, StudentId, StudentProfile, UserId,
};
use super::eligibility::{is_eligible, unmet_criteria, UnmetCriterion};
use super::import::{read_roster, ImportSummary, RosterRow, StudentImportError};
use super::input::{
    BulkStatusFailure, BulkStatusOutcome, OfferRequest, OpportunityFilter, OpportunityInput,
    StudentProfileInput,
};
use super::repository::{
    ApplicationRepository, Clock, NotificationKind, NotificationPublisher, OpportunityRepository,
    PlacementNotification, PlacementStore, RepositoryError, StudentRepository, SystemClock,
    UnitOfWork,
};
use super::stats::PlacementStats;

/// Application lifecycle manager plus the opportunity and profile operations around it.
///
/// Every mutation runs inside a single store transaction. Notifications are enqueued only
/// after the transaction commits and their failures are logged, never returned.
pub struct PlacementService<S, N, C = SystemClock> {
    store: Arc<S>,
    notifications: Arc<N>,
    clock: Arc<C>,
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id(prefix: &str) -> String {
    record_id(prefix, RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Ids are listed in string order, so the sequence is padded to the full width of a u64.
pub(super) fn record_id(prefix: &str, sequence: u64) -> String {
    format!("{prefix}-{sequence:020}")
}

impl<S, N> PlacementService<S, N, SystemClock>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(store: Arc<S>, notifications: Arc<N>) -> Self {
        Self::with_clock(store, notifications, Arc::new(SystemClock))
    }
}

impl<S, N, C> PlacementService<S, N, C>
where
    S: PlacementStore + 'static,
    N: NotificationPublisher + 'static,
    C: Clock + 'static,
{
    pub fn with_clock(store: Arc<S>, notifications: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            store,
            notifications,
            clock,
        }
    }

    /// Apply on behalf of the student owning `user`.
    pub fn apply(
        &self,
        user: &UserId,
        opportunity_id: &OpportunityId,
    ) -> Result<ApplicationView, PlacementError> {
        let now = self.clock.now();

        let view = self
            .store
            .with_transaction(|work| -> Result<ApplicationView, PlacementError> {
                let student = work
                    .student_by_user(user)?
                    .ok_or_else(|| PlacementError::ProfileMissing(user.clone()))?;
                if !student.is_profile_complete {
                    return Err(PlacementError::ProfileIncomplete(
                        "complete your profile before applying",
                    ));
                }
                if !student.has_resume() {
                    return Err(PlacementError::ProfileIncomplete(
                        "upload a resume before applying",
                    ));
                }

                let opportunity = work
                    .opportunity(opportunity_id)?
                    .ok_or_else(|| PlacementError::OpportunityNotFound(opportunity_id.clone()))?;
                if opportunity.status != OpportunityStatus::Open {
                    return Err(PlacementError::OpportunityClosed(opportunity.id));
                }
                if now >= opportunity.last_date_to_apply {
                    return Err(PlacementError::DeadlinePassed(opportunity.id));
                }

                let unmet = unmet_criteria(&student, opportunity.eligibility.as_ref());
                if !unmet.is_empty() {
                    return Err(PlacementError::NotEligible { unmet });
                }

                if work.application_for(&student.id, &opportunity.id)?.is_some() {
                    return Err(PlacementError::DuplicateApplication(opportunity.id));
                }

                let application = Application {
                    id: ApplicationId(next_record_id("app")),
                    student_id: student.id.clone(),
                    opportunity_id: opportunity.id.clone(),
                    status: ApplicationStatus::Applied,
                    current_round: None,
                    offer: None,
                    applied_at: now,
                    updated_at: now,
                };
                work.insert_application(application.clone())
                    .map_err(|err| match err {
                        RepositoryError::Conflict => {
                            PlacementError::DuplicateApplication(opportunity.id.clone())
                        }
                        other => other.into(),
                    })?;

                Ok(ApplicationView {
                    application,
                    opportunity: opportunity.summary(),
                })
            })?;

        info!(
            application_id = %view.application.id,
            student_id = %view.application.student_id,
            opportunity_id = %view.application.opportunity_id,
            "application submitted"
        );
        Ok(view)
    }

    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        target: ApplicationStatus,
        current_round: Option<u32>,
    ) -> Result<Application, PlacementError> {
        self.transition(application_id, target, current_round, None)
    }

    /// Moves an application to OFFERED with explicit offer terms.
    pub fn create_offer(&self, request: OfferRequest) -> Result<Application, PlacementError> {
        let OfferRequest {
            application_id,
            ctc,
            joining_date,
            offer_letter_url,
        } = request;
        let offer = OfferDetails {
            ctc,
            joining_date,
            offer_letter_url,
        };
        self.transition(&application_id, ApplicationStatus::Offered, None, Some(offer))
    }

    /// Applies `target` to each application independently. Rows whose current status
    /// cannot reach `target` are reported as failures and left untouched.
    pub fn bulk_update_status(
        &self,
        application_ids: &[ApplicationId],
        target: ApplicationStatus,
    ) -> BulkStatusOutcome {
        let mut outcome = BulkStatusOutcome::default();

        for application_id in application_ids {
            match self.transition(application_id, target, None, None) {
                Ok(_) => outcome.count += 1,
                Err(err) => outcome.failures.push(BulkStatusFailure {
                    application_id: application_id.clone(),
                    kind: err.kind(),
                    error: err.to_string(),
                }),
            }
        }

        info!(
            status = %target,
            updated = outcome.count,
            failed = outcome.failures.len(),
            "bulk status update finished"
        );
        outcome
    }

    fn transition(
        &self,
        application_id: &ApplicationId,
        target: ApplicationStatus,
        current_round: Option<u32>,
        offer: Option<OfferDetails>,
    ) -> Result<Application, PlacementError> {
        let now = self.clock.now();

        let result = self.store.with_transaction(
            |work| -> Result<(Application, Opportunity), PlacementError> {
                let mut application = work
                    .application(application_id)?
                    .ok_or_else(|| PlacementError::ApplicationNotFound(application_id.clone()))?;

                let from = application.status;
                if !from.can_transition_to(target) {
                    return Err(PlacementError::IllegalTransition { from, to: target });
                }

                let opportunity = work
                    .opportunity(&application.opportunity_id)?
                    .ok_or_else(|| {
                        PlacementError::OpportunityNotFound(application.opportunity_id.clone())
                    })?;

                application.status = target;
                if current_round.is_some() {
                    application.current_round = current_round;
                }
                application.updated_at = now;

                if target == ApplicationStatus::Offered {
                    let offer = offer.unwrap_or_default();
                    application.offer = Some(offer.clone());
                    work.save_application(application.clone())?;
                    record_placement(work, &application.student_id, &opportunity, &offer)?;
                } else {
                    work.save_application(application.clone())?;
                }

                Ok((application, opportunity))
            },
        );

        let (application, opportunity) = match result {
            Ok(updated) => updated,
            Err(err) => {
                if let PlacementError::IllegalTransition { from, to } = &err {
                    debug!(application_id = %application_id, %from, %to, "transition rejected");
                }
                return Err(err);
            }
        };

        info!(
            application_id = %application.id,
            status = %application.status,
            current_round = ?application.current_round,
            "application status updated"
        );

        if let Some(kind) = notification_kind(target) {
            let mut details = BTreeMap::new();
            details.insert("status".to_string(), target.label().to_string());
            if let Some(round) = application.current_round {
                details.insert("currentRound".to_string(), round.to_string());
            }
            if let Some(ctc) = application.offer.as_ref().and_then(|offer| offer.ctc.clone()) {
                details.insert("ctc".to_string(), ctc);
            }
            self.notify(PlacementNotification {
                kind,
                recipient: application.student_id.clone(),
                opportunity_id: opportunity.id.clone(),
                application_id: Some(application.id.clone()),
                title: format!("{} - {}", opportunity.company_name, opportunity.role_title),
                details,
            });
        }

        Ok(application)
    }

    /// Open, not yet expired opportunities in the student's institution they qualify for.
    pub fn eligible_opportunities(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Opportunity>, PlacementError> {
        let now = self.clock.now();
        self.store
            .with_transaction(|work| -> Result<Vec<Opportunity>, PlacementError> {
                let student = work
                    .student(student_id)?
                    .ok_or_else(|| PlacementError::StudentNotFound(student_id.clone()))?;
                let opportunities = work.opportunities_in(&student.institution_id)?;
                Ok(opportunities
                    .into_iter()
                    .filter(|opportunity| opportunity.accepts_applications_at(now))
                    .filter(|opportunity| is_eligible(&student, opportunity.eligibility.as_ref()))
                    .collect())
            })
    }

    /// Complete profiles in the opportunity's institution that satisfy its criteria.
    pub fn eligible_students(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<Vec<StudentProfile>, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<Vec<StudentProfile>, PlacementError> {
                let opportunity = work
                    .opportunity(opportunity_id)?
                    .ok_or_else(|| PlacementError::OpportunityNotFound(opportunity_id.clone()))?;
                eligible_students_in(work, &opportunity)
            })
    }

    pub fn upsert_student_profile(
        &self,
        user: &UserId,
        institution: &InstitutionId,
        input: StudentProfileInput,
    ) -> Result<StudentProfile, PlacementError> {
        input.validate()?;

        let (profile, created) = self.store.with_transaction(
            |work| -> Result<(StudentProfile, bool), PlacementError> {
                match work.student_by_user(user)? {
                    Some(profile) if profile.institution_id != *institution => {
                        Err(PlacementError::Validation(format!(
                            "profile of {user} belongs to institution {}",
                            profile.institution_id
                        )))
                    }
                    Some(mut profile) => {
                        merge_profile(&mut profile, input);
                        work.save_student(profile.clone())?;
                        Ok((profile, false))
                    }
                    None => {
                        let profile = new_profile(user, institution, input)?;
                        work.insert_student(profile.clone())?;
                        Ok((profile, true))
                    }
                }
            },
        )?;

        info!(
            student_id = %profile.id,
            created,
            complete = profile.is_profile_complete,
            "student profile saved"
        );
        Ok(profile)
    }

    pub fn student(&self, student_id: &StudentId) -> Result<StudentProfile, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<StudentProfile, PlacementError> {
                work.student(student_id)?
                    .ok_or_else(|| PlacementError::StudentNotFound(student_id.clone()))
            })
    }

    pub fn students(
        &self,
        institution: &InstitutionId,
    ) -> Result<Vec<StudentProfile>, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<Vec<StudentProfile>, PlacementError> {
                Ok(work.students_in(institution)?)
            })
    }

    /// Creates profiles for each roster row; rows that fail are reported, not fatal.
    pub fn import_students<R: Read>(
        &self,
        institution: &InstitutionId,
        reader: R,
    ) -> Result<ImportSummary, StudentImportError> {
        let rows = read_roster(reader)?;
        Ok(self.import_rows(institution, rows))
    }

    pub(crate) fn import_rows(
        &self,
        institution: &InstitutionId,
        rows: Vec<RosterRow>,
    ) -> ImportSummary {
        let mut summary = ImportSummary {
            total: rows.len(),
            ..ImportSummary::default()
        };

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            let (user, input) = match row.into_input() {
                Ok(parsed) => parsed,
                Err(message) => {
                    summary.record_failure(row_number, message);
                    continue;
                }
            };
            if let Err(err) = input.validate() {
                summary.record_failure(row_number, err.to_string());
                continue;
            }

            let inserted = self
                .store
                .with_transaction(|work| -> Result<(), PlacementError> {
                    let profile = new_profile(&user, institution, input)?;
                    work.insert_student(profile).map_err(|err| match err {
                        RepositoryError::Conflict => PlacementError::Validation(format!(
                            "user {user} already has a student profile"
                        )),
                        other => other.into(),
                    })
                });

            match inserted {
                Ok(()) => summary.created += 1,
                Err(err) => summary.record_failure(row_number, err.to_string()),
            }
        }

        info!(
            institution = %institution,
            total = summary.total,
            created = summary.created,
            failed = summary.failed,
            "student roster imported"
        );
        summary
    }

    pub fn create_opportunity(
        &self,
        institution: &InstitutionId,
        input: OpportunityInput,
    ) -> Result<Opportunity, PlacementError> {
        input.validate()?;
        let now = self.clock.now();

        let mut rounds = input.rounds;
        rounds.sort_by_key(|round| round.round_order);
        let opportunity = Opportunity {
            id: OpportunityId(next_record_id("opp")),
            institution_id: institution.clone(),
            company_name: input.company_name,
            role_title: input.role_title,
            opportunity_type: input.opportunity_type,
            location: input.location,
            ctc: input.ctc,
            description: input.description,
            last_date_to_apply: input.last_date_to_apply,
            status: OpportunityStatus::Open,
            eligibility: input.eligibility,
            rounds,
            created_at: now,
        };

        let recipients = self.store.with_transaction(
            |work| -> Result<Vec<StudentProfile>, PlacementError> {
                work.insert_opportunity(opportunity.clone())?;
                eligible_students_in(work, &opportunity)
            },
        )?;

        info!(
            opportunity_id = %opportunity.id,
            company = %opportunity.company_name,
            eligible = recipients.len(),
            "opportunity published"
        );

        for student in recipients {
            self.notify(PlacementNotification {
                kind: NotificationKind::NewOpportunity,
                recipient: student.id,
                opportunity_id: opportunity.id.clone(),
                application_id: None,
                title: format!("{} - {}", opportunity.company_name, opportunity.role_title),
                details: BTreeMap::from([(
                    "lastDateToApply".to_string(),
                    opportunity.last_date_to_apply.to_rfc3339(),
                )]),
            });
        }

        Ok(opportunity)
    }

    pub fn opportunity(&self, opportunity_id: &OpportunityId) -> Result<Opportunity, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<Opportunity, PlacementError> {
                work.opportunity(opportunity_id)?
                    .ok_or_else(|| PlacementError::OpportunityNotFound(opportunity_id.clone()))
            })
    }

    pub fn list_opportunities(
        &self,
        institution: &InstitutionId,
        filter: OpportunityFilter,
    ) -> Result<Vec<Opportunity>, PlacementError> {
        let opportunities = self
            .store
            .with_transaction(|work| -> Result<Vec<Opportunity>, PlacementError> {
                Ok(work.opportunities_in(institution)?)
            })?;

        Ok(opportunities
            .into_iter()
            .filter(|opportunity| filter.status.map_or(true, |status| opportunity.status == status))
            .filter(|opportunity| {
                filter
                    .opportunity_type
                    .map_or(true, |kind| opportunity.opportunity_type == kind)
            })
            .collect())
    }

    /// Stops accepting applications. Closing twice is harmless.
    pub fn close_opportunity(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<Opportunity, PlacementError> {
        let opportunity = self
            .store
            .with_transaction(|work| -> Result<Opportunity, PlacementError> {
                let mut opportunity = work
                    .opportunity(opportunity_id)?
                    .ok_or_else(|| PlacementError::OpportunityNotFound(opportunity_id.clone()))?;
                if opportunity.status != OpportunityStatus::Closed {
                    opportunity.status = OpportunityStatus::Closed;
                    work.save_opportunity(opportunity.clone())?;
                }
                Ok(opportunity)
            })?;

        info!(opportunity_id = %opportunity.id, "opportunity closed");
        Ok(opportunity)
    }

    pub fn application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationView, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<ApplicationView, PlacementError> {
                let application = work
                    .application(application_id)?
                    .ok_or_else(|| PlacementError::ApplicationNotFound(application_id.clone()))?;
                view_of(work, application)
            })
    }

    pub fn applications_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<ApplicationView>, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<Vec<ApplicationView>, PlacementError> {
                let work = &*work;
                if work.student(student_id)?.is_none() {
                    return Err(PlacementError::StudentNotFound(student_id.clone()));
                }
                work.applications_by_student(student_id)?
                    .into_iter()
                    .map(|application| view_of(work, application))
                    .collect()
            })
    }

    pub fn applications_for_opportunity(
        &self,
        opportunity_id: &OpportunityId,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, PlacementError> {
        self.store
            .with_transaction(|work| -> Result<Vec<Application>, PlacementError> {
                if work.opportunity(opportunity_id)?.is_none() {
                    return Err(PlacementError::OpportunityNotFound(opportunity_id.clone()));
                }
                Ok(work
                    .applications_by_opportunity(opportunity_id)?
                    .into_iter()
                    .filter(|application| status.map_or(true, |status| application.status == status))
                    .collect())
            })
    }

    pub fn placement_stats(
        &self,
        institution: &InstitutionId,
    ) -> Result<PlacementStats, PlacementError> {
        let (profiles, opportunities) = self.store.with_transaction(
            |work| -> Result<(Vec<StudentProfile>, Vec<Opportunity>), PlacementError> {
                Ok((
                    work.students_in(institution)?,
                    work.opportunities_in(institution)?,
                ))
            },
        )?;
        let active_opportunities = opportunities
            .iter()
            .filter(|opportunity| opportunity.status == OpportunityStatus::Open)
            .count();
        Ok(PlacementStats::from_profiles(&profiles)
            .with_active_opportunities(active_opportunities))
    }

    fn notify(&self, notification: PlacementNotification) {
        let kind = notification.kind;
        let recipient = notification.recipient.clone();
        if let Err(err) = self.notifications.publish(notification) {
            warn!(?kind, %recipient, error = %err, "failed to enqueue notification");
        }
    }
}

fn record_placement<W: UnitOfWork>(
    work: &mut W,
    student_id: &StudentId,
    opportunity: &Opportunity,
    offer: &OfferDetails,
) -> Result<(), PlacementError> {
    let mut student = work
        .student(student_id)?
        .ok_or_else(|| PlacementError::StudentNotFound(student_id.clone()))?;
    student.record_placement(opportunity, offer);
    work.save_student(student)?;
    Ok(())
}

fn eligible_students_in<W: UnitOfWork>(
    work: &W,
    opportunity: &Opportunity,
) -> Result<Vec<StudentProfile>, PlacementError> {
    Ok(work
        .students_in(&opportunity.institution_id)?
        .into_iter()
        .filter(|student| student.is_profile_complete)
        .filter(|student| is_eligible(student, opportunity.eligibility.as_ref()))
        .collect())
}

fn view_of<W: UnitOfWork>(
    work: &W,
    application: Application,
) -> Result<ApplicationView, PlacementError> {
    let opportunity = work
        .opportunity(&application.opportunity_id)?
        .ok_or_else(|| PlacementError::OpportunityNotFound(application.opportunity_id.clone()))?;
    Ok(ApplicationView {
        application,
        opportunity: opportunity.summary(),
    })
}

fn new_profile(
    user: &UserId,
    institution: &InstitutionId,
    input: StudentProfileInput,
) -> Result<StudentProfile, PlacementError> {
    let (Some(branch), Some(graduation_year)) = (input.branch.clone(), input.graduation_year)
    else {
        return Err(PlacementError::Validation(
            "branch and graduationYear are required for a new profile".to_string(),
        ));
    };

    let mut profile = StudentProfile {
        id: StudentId(next_record_id("stu")),
        user_id: user.clone(),
        institution_id: institution.clone(),
        full_name: input.full_name,
        enrollment_no: input.enrollment_no,
        course: input.course,
        branch,
        graduation_year,
        cgpa: input.cgpa,
        tenth_percentage: input.tenth_percentage,
        twelfth_percentage: input.twelfth_percentage,
        active_backlogs: input.active_backlogs.unwrap_or(0),
        resume_url: input.resume_url,
        is_profile_complete: false,
        is_placed: false,
        placed_company: None,
        placed_role: None,
        placed_ctc: None,
        placement_type: None,
    };
    profile.is_profile_complete = profile.compute_completeness();
    Ok(profile)
}

fn merge_profile(profile: &mut StudentProfile, input: StudentProfileInput) {
    let StudentProfileInput {
        full_name,
        enrollment_no,
        course,
        branch,
        graduation_year,
        cgpa,
        tenth_percentage,
        twelfth_percentage,
        active_backlogs,
        resume_url,
    } = input;

    if full_name.is_some() {
        profile.full_name = full_name;
    }
    if enrollment_no.is_some() {
        profile.enrollment_no = enrollment_no;
    }
    if course.is_some() {
        profile.course = course;
    }
    if let Some(branch) = branch {
        profile.branch = branch;
    }
    if let Some(year) = graduation_year {
        profile.graduation_year = year;
    }
    if cgpa.is_some() {
        profile.cgpa = cgpa;
    }
    if tenth_percentage.is_some() {
        profile.tenth_percentage = tenth_percentage;
    }
    if twelfth_percentage.is_some() {
        profile.twelfth_percentage = twelfth_percentage;
    }
    if let Some(backlogs) = active_backlogs {
        profile.active_backlogs = backlogs;
    }
    if resume_url.is_some() {
        profile.resume_url = resume_url;
    }
    profile.is_profile_complete = profile.compute_completeness();
}

fn notification_kind(status: ApplicationStatus) -> Option<NotificationKind> {
    match status {
        ApplicationStatus::Shortlisted => Some(NotificationKind::Shortlisted),
        ApplicationStatus::Round1 | ApplicationStatus::Round2 => {
            Some(NotificationKind::InterviewScheduled)
        }
        ApplicationStatus::Offered => Some(NotificationKind::OfferReceived),
        ApplicationStatus::Rejected => Some(NotificationKind::Rejected),
        ApplicationStatus::Applied => None,
    }
}

fn describe_unmet(unmet: &[UnmetCriterion]) -> String {
    unmet
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error raised by the placement service.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("no student profile exists for user {0}")]
    ProfileMissing(UserId),
    #[error("student profile is incomplete: {0}")]
    ProfileIncomplete(&'static str),
    #[error("opportunity {0} not found")]
    OpportunityNotFound(OpportunityId),
    #[error("opportunity {0} is no longer accepting applications")]
    OpportunityClosed(OpportunityId),
    #[error("application deadline for opportunity {0} has passed")]
    DeadlinePassed(OpportunityId),
    #[error("student does not meet the eligibility criteria: {}", describe_unmet(.unmet))]
    NotEligible { unmet: Vec<UnmetCriterion> },
    #[error("student has already applied to opportunity {0}")]
    DuplicateApplication(OpportunityId),
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("student profile {0} not found")]
    StudentNotFound(StudentId),
    #[error("cannot transition application from {from} to {to}")]
    IllegalTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PlacementError {
    /// Stable tag exposed to API clients.
    pub const fn kind(&self) -> &'static str {
        match self {
            PlacementError::ProfileMissing(_) => "profile_missing",
            PlacementError::ProfileIncomplete(_) => "profile_incomplete",
            PlacementError::OpportunityNotFound(_) => "opportunity_not_found",
            PlacementError::OpportunityClosed(_) => "opportunity_closed",
            PlacementError::DeadlinePassed(_) => "deadline_passed",
            PlacementError::NotEligible { .. } => "not_eligible",
            PlacementError::DuplicateApplication(_) => "duplicate_application",
            PlacementError::ApplicationNotFound(_) => "application_not_found",
            PlacementError::StudentNotFound(_) => "student_not_found",
            PlacementError::IllegalTransition { .. } => "illegal_transition",
            PlacementError::Validation(_) => "validation",
            PlacementError::Repository(_) => "repository",
        }
    }
}
