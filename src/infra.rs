use metrics_exporter_prometheus::PrometheusHandle;
use placement_portal::config::SeedConfig;
use placement_portal::error::AppError;
use placement_portal::placement::{
    ImportSummary, InMemoryNotificationOutbox, InMemoryPlacementStore, InstitutionId,
    PlacementService,
};
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type MemoryPlacementService =
    PlacementService<InMemoryPlacementStore, InMemoryNotificationOutbox>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_service() -> MemoryPlacementService {
    PlacementService::new(
        Arc::new(InMemoryPlacementStore::default()),
        Arc::new(InMemoryNotificationOutbox::default()),
    )
}

/// Loads the configured roster, if any, into the store before the listener starts.
pub(crate) fn seed_students(
    service: &MemoryPlacementService,
    seed: &SeedConfig,
) -> Result<Option<ImportSummary>, AppError> {
    let Some(path) = &seed.students_csv else {
        return Ok(None);
    };

    let roster = File::open(path)?;
    let summary = service.import_students(&InstitutionId(seed.institution.clone()), roster)?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use placement_portal::placement::UserId;
    use std::path::PathBuf;

    #[test]
    fn seeding_is_skipped_without_a_roster() {
        let service = build_service();
        let seed = SeedConfig {
            students_csv: None,
            institution: "default".to_string(),
        };

        assert!(seed_students(&service, &seed)
            .expect("nothing to load")
            .is_none());
    }

    #[test]
    fn seeding_imports_roster_into_configured_institution() {
        let path = std::env::temp_dir().join(format!(
            "placement-seed-{}.csv",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "userId,enrollmentNo,course,branch,graduationYear\nu-seed,EN9,BTech,CS,2026\n",
        )
        .expect("write roster");
        let service = build_service();
        let seed = SeedConfig {
            students_csv: Some(path.clone()),
            institution: "inst-seed".to_string(),
        };

        let summary = seed_students(&service, &seed)
            .expect("roster loads")
            .expect("summary returned");
        let _ = std::fs::remove_file(&path);

        assert_eq!(summary.created, 1);
        let students = service
            .students(&InstitutionId::from("inst-seed"))
            .expect("students listed");
        assert_eq!(students[0].user_id, UserId::from("u-seed"));
    }

    #[test]
    fn missing_roster_file_is_an_io_error() {
        let service = build_service();
        let seed = SeedConfig {
            students_csv: Some(PathBuf::from("/nonexistent/placement/roster.csv")),
            institution: "default".to_string(),
        };

        assert!(matches!(
            seed_students(&service, &seed),
            Err(AppError::Io(_))
        ));
    }
}
