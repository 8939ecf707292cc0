//! Report persistence.
//!
//! Reports are immutable once written: there is no update or delete surface.
//! A new report enters storage only through the diagnosis-submission flow,
//! which validates the submission, classifies the scan and then calls
//! [`ReportService::create`] with both halves.
//!
//! ## Storage layout
//!
//! ```text
//! <data_dir>/reports/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         report.json
//! ```

use crate::classify::DiagnosisResult;
use crate::config::CoreConfig;
use crate::constants::REPORT_FILE_NAME;
use crate::error::{ReportError, ReportResult};
use crate::report::Report;
use crate::repositories::shared::{collect_records, read_json_record, write_json_record};
use crate::uuid::ShardableUuid;
use crate::validation::ValidatedSubmission;
use chrono::Utc;
use std::sync::Arc;

/// Pure report data operations - no API concerns.
#[derive(Clone)]
pub struct ReportService {
    cfg: Arc<CoreConfig>,
}

impl ReportService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Persists a new report from a validated submission and its diagnosis.
    ///
    /// The diagnosis result is taken as one atomic unit: status, risk level,
    /// confidence, details and recommendations all come from the same
    /// classification and are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns a `ReportError` if the record directory cannot be created or
    /// the document cannot be serialised or written.
    pub fn create(
        &self,
        submission: ValidatedSubmission,
        diagnosis: DiagnosisResult,
    ) -> ReportResult<Report> {
        let id = ShardableUuid::new();
        let report = Report {
            id: id.clone(),
            patient_name: submission.patient_name.into_inner(),
            age: submission.age,
            gender: submission.gender,
            scan_type: submission.scan_type,
            status: diagnosis.status,
            risk_level: diagnosis.risk_level,
            confidence: diagnosis.confidence,
            diagnosis: diagnosis.diagnosis,
            details: Some(diagnosis.details),
            clinical_notes: submission.clinical_notes,
            recommendations: diagnosis.recommendations,
            image_url: submission.image_url,
            created_at: Utc::now(),
        };

        let record_dir = id.sharded_dir(&self.cfg.reports_dir());
        write_json_record(&record_dir, REPORT_FILE_NAME, &report)?;

        tracing::info!("created report {id} ({})", report.diagnosis);
        Ok(report)
    }

    /// Lists all reports, newest first.
    ///
    /// Corrupt individual documents are skipped with a warning.
    pub fn list(&self) -> Vec<Report> {
        let mut reports: Vec<Report> =
            collect_records(&self.cfg.reports_dir(), REPORT_FILE_NAME);
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    /// Loads one report by its canonical identifier.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::ReportNotFound` if no document exists for `id`.
    pub fn get(&self, id: &ShardableUuid) -> ReportResult<Report> {
        let path = id
            .sharded_dir(&self.cfg.reports_dir())
            .join(REPORT_FILE_NAME);
        if !path.is_file() {
            return Err(ReportError::ReportNotFound(id.to_string()));
        }
        read_json_record(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{CannedClassifier, Classifier, PatientContext, ScanInput};
    use crate::report::ScanType;
    use crate::validation::{validate_submission, ScanSubmission};
    use std::fs;

    fn test_service() -> (tempfile::TempDir, ReportService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = CoreConfig::new(dir.path().to_path_buf(), "test-secret".into(), 12).unwrap();
        let service = ReportService::new(Arc::new(cfg));
        (dir, service)
    }

    fn submit(service: &ReportService, patient: &str) -> Report {
        let submission = ScanSubmission {
            patient_name: Some(patient.into()),
            age: Some(61),
            gender: Some("male".into()),
            scan_type: Some("ct".into()),
            scan_file_name: Some("scan.png".into()),
            clinical_notes: None,
            image_url: None,
        };
        let validated = validate_submission(&submission).unwrap();
        let classifier = CannedClassifier::with_seed(1);
        let diagnosis = classifier.classify(
            &ScanInput {
                file_name: "scan.png",
                image_url: None,
            },
            &PatientContext {
                patient_name: patient,
                age: 61,
                scan_type: ScanType::Ct,
                clinical_notes: None,
            },
        );
        service.create(validated, diagnosis).expect("create report")
    }

    #[test]
    fn created_reports_can_be_fetched_by_id() {
        let (_dir, service) = test_service();
        let created = submit(&service, "Alice Example");
        let fetched = service.get(&created.id).unwrap();
        assert_eq!(fetched.patient_name, "Alice Example");
        assert_eq!(fetched.diagnosis, created.diagnosis);
        assert_eq!(fetched.confidence, created.confidence);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let (_dir, service) = test_service();
        let id = ShardableUuid::new();
        assert!(matches!(
            service.get(&id),
            Err(ReportError::ReportNotFound(_))
        ));
    }

    #[test]
    fn list_returns_newest_first() {
        let (_dir, service) = test_service();
        submit(&service, "First Patient");
        std::thread::sleep(std::time::Duration::from_millis(5));
        submit(&service, "Second Patient");
        std::thread::sleep(std::time::Duration::from_millis(5));
        submit(&service, "Third Patient");

        let reports = service.list();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].patient_name, "Third Patient");
        for pair in reports.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn empty_data_dir_lists_nothing() {
        let (_dir, service) = test_service();
        assert!(service.list().is_empty());
    }

    #[test]
    fn corrupt_documents_are_skipped_not_fatal() {
        let (_dir, service) = test_service();
        let kept = submit(&service, "Kept Patient");

        // Clobber a second record with garbage.
        let broken = submit(&service, "Broken Patient");
        let broken_path = broken
            .id
            .sharded_dir(&service.cfg.reports_dir())
            .join(REPORT_FILE_NAME);
        fs::write(&broken_path, "not json").unwrap();

        let reports = service.list();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, kept.id);
    }
}
