use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    Application, ApplicationId, InstitutionId, Opportunity, OpportunityId, StudentId,
    StudentProfile, UserId,
};
use super::repository::{
    ApplicationRepository, NotificationError, NotificationPublisher, OpportunityRepository,
    PlacementNotification, PlacementStore, RepositoryError, StudentRepository,
};

/// Plain table state. Transactions operate on a copy and swap it in on commit.
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    students: HashMap<StudentId, StudentProfile>,
    opportunities: HashMap<OpportunityId, Opportunity>,
    applications: HashMap<ApplicationId, Application>,
}

impl StudentRepository for MemoryTables {
    fn student(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        Ok(self.students.get(id).cloned())
    }

    fn student_by_user(&self, user: &UserId) -> Result<Option<StudentProfile>, RepositoryError> {
        Ok(self
            .students
            .values()
            .find(|profile| &profile.user_id == user)
            .cloned())
    }

    fn students_in(
        &self,
        institution: &InstitutionId,
    ) -> Result<Vec<StudentProfile>, RepositoryError> {
        let mut students: Vec<_> = self
            .students
            .values()
            .filter(|profile| &profile.institution_id == institution)
            .cloned()
            .collect();
        students.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(students)
    }

    fn insert_student(&mut self, profile: StudentProfile) -> Result<(), RepositoryError> {
        let taken = self.students.contains_key(&profile.id)
            || self
                .students
                .values()
                .any(|existing| existing.user_id == profile.user_id);
        if taken {
            return Err(RepositoryError::Conflict);
        }
        self.students.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn save_student(&mut self, profile: StudentProfile) -> Result<(), RepositoryError> {
        match self.students.get_mut(&profile.id) {
            Some(slot) => {
                *slot = profile;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

impl OpportunityRepository for MemoryTables {
    fn opportunity(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError> {
        Ok(self.opportunities.get(id).cloned())
    }

    fn opportunities_in(
        &self,
        institution: &InstitutionId,
    ) -> Result<Vec<Opportunity>, RepositoryError> {
        let mut opportunities: Vec<_> = self
            .opportunities
            .values()
            .filter(|opportunity| &opportunity.institution_id == institution)
            .cloned()
            .collect();
        opportunities.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(opportunities)
    }

    fn insert_opportunity(&mut self, opportunity: Opportunity) -> Result<(), RepositoryError> {
        if self.opportunities.contains_key(&opportunity.id) {
            return Err(RepositoryError::Conflict);
        }
        self.opportunities
            .insert(opportunity.id.clone(), opportunity);
        Ok(())
    }

    fn save_opportunity(&mut self, opportunity: Opportunity) -> Result<(), RepositoryError> {
        match self.opportunities.get_mut(&opportunity.id) {
            Some(slot) => {
                *slot = opportunity;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

impl ApplicationRepository for MemoryTables {
    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self.applications.get(id).cloned())
    }

    fn application_for(
        &self,
        student: &StudentId,
        opportunity: &OpportunityId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .applications
            .values()
            .find(|application| {
                &application.student_id == student && &application.opportunity_id == opportunity
            })
            .cloned())
    }

    fn applications_by_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(newest_first(
            self.applications
                .values()
                .filter(|application| &application.student_id == student),
        ))
    }

    fn applications_by_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(newest_first(
            self.applications
                .values()
                .filter(|application| &application.opportunity_id == opportunity),
        ))
    }

    fn insert_application(&mut self, application: Application) -> Result<(), RepositoryError> {
        let duplicate = self.applications.contains_key(&application.id)
            || self.applications.values().any(|existing| {
                existing.student_id == application.student_id
                    && existing.opportunity_id == application.opportunity_id
            });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        self.applications
            .insert(application.id.clone(), application);
        Ok(())
    }

    fn save_application(&mut self, application: Application) -> Result<(), RepositoryError> {
        match self.applications.get_mut(&application.id) {
            Some(slot) => {
                *slot = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

fn newest_first<'a>(applications: impl Iterator<Item = &'a Application>) -> Vec<Application> {
    let mut applications: Vec<_> = applications.cloned().collect();
    applications.sort_by(|a, b| {
        b.applied_at
            .cmp(&a.applied_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    applications
}

/// Store backed by a single mutex; transactions are serialised and all-or-nothing.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlacementStore {
    tables: Arc<Mutex<MemoryTables>>,
}

impl InMemoryPlacementStore {
    fn lock(&self) -> Result<MutexGuard<'_, MemoryTables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl PlacementStore for InMemoryPlacementStore {
    type Work = MemoryTables;

    fn with_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Work) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.lock()?;
        let mut draft = guard.clone();
        let output = work(&mut draft)?;
        *guard = draft;
        Ok(output)
    }
}

/// Notification outbox kept in memory; stands in for the delivery queue.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationOutbox {
    events: Arc<Mutex<Vec<PlacementNotification>>>,
}

impl InMemoryNotificationOutbox {
    pub fn events(&self) -> Vec<PlacementNotification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl NotificationPublisher for InMemoryNotificationOutbox {
    fn publish(&self, notification: PlacementNotification) -> Result<(), NotificationError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| NotificationError::Transport("outbox mutex poisoned".to_string()))?;
        tracing::debug!(
            kind = ?notification.kind,
            recipient = %notification.recipient,
            "notification queued"
        );
        events.push(notification);
        Ok(())
    }
}
