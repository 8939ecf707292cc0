//! Diagnosis-submission validation.
//!
//! Validation runs before a scan is classified and persisted. Failures are
//! local and synchronous: the submission is blocked with a message naming
//! what is wrong, nothing is stored, and nothing is classified.

use crate::constants::{ALLOWED_SCAN_EXTENSIONS, MAX_PATIENT_AGE};
use crate::error::{ReportError, ReportResult};
use crate::report::{Gender, ScanType};
use cardioscan_types::NonEmptyText;

/// A raw diagnosis submission, as received from the upload form.
///
/// Fields arrive untrusted; [`validate_submission`] turns this into a
/// [`ValidatedSubmission`] or rejects it.
#[derive(Debug, Clone, Default)]
pub struct ScanSubmission {
    pub patient_name: Option<String>,
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub scan_type: Option<String>,
    /// Original file name of the uploaded scan, extension included.
    pub scan_file_name: Option<String>,
    pub clinical_notes: Option<String>,
    /// Data URL or remote URL of the scan preview.
    pub image_url: Option<String>,
}

/// A submission that passed validation, with every field in its domain type.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub patient_name: NonEmptyText,
    pub age: u16,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub scan_file_name: String,
    pub clinical_notes: Option<String>,
    pub image_url: Option<String>,
}

/// Checks that an uploaded file name carries an accepted scan extension.
///
/// Accepted formats are common raster images plus DICOM; matching is
/// case-insensitive on the extension only.
///
/// # Errors
///
/// Returns `ReportError::InvalidInput` when the extension is missing or not
/// in the whitelist.
pub fn validate_scan_file_name(file_name: &str) -> ReportResult<()> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ALLOWED_SCAN_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ReportError::InvalidInput(format!(
            "invalid scan file type '{file_name}': expected one of {}",
            ALLOWED_SCAN_EXTENSIONS.join(", ")
        ))),
    }
}

/// Validates a raw submission.
///
/// Required fields are patient name, age, gender, scan type and the scan
/// file itself. All missing fields are reported together so the form can be
/// corrected in one pass.
///
/// # Errors
///
/// Returns `ReportError::InvalidInput` naming every missing required field,
/// or describing the first malformed one (age out of range, unknown gender or
/// scan type, disallowed file extension).
pub fn validate_submission(submission: &ScanSubmission) -> ReportResult<ValidatedSubmission> {
    let mut missing = Vec::new();

    let name = submission
        .patient_name
        .as_deref()
        .and_then(|n| NonEmptyText::new(n).ok());
    if name.is_none() {
        missing.push("patientName");
    }
    if submission.age.is_none() {
        missing.push("age");
    }
    if submission.gender.as_deref().map_or(true, str::is_empty) {
        missing.push("gender");
    }
    if submission.scan_type.as_deref().map_or(true, str::is_empty) {
        missing.push("scanType");
    }
    if submission
        .scan_file_name
        .as_deref()
        .map_or(true, str::is_empty)
    {
        missing.push("scanFile");
    }

    if !missing.is_empty() {
        return Err(ReportError::InvalidInput(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    // All required fields are present from here on.
    let patient_name = name.expect("checked above");
    let age = submission.age.expect("checked above");
    if age == 0 || age > MAX_PATIENT_AGE {
        return Err(ReportError::InvalidInput(format!(
            "age must be between 1 and {MAX_PATIENT_AGE}, got {age}"
        )));
    }

    let gender_raw = submission.gender.as_deref().expect("checked above");
    let gender: Gender = gender_raw.parse().map_err(|()| {
        ReportError::InvalidInput(format!("unknown gender '{gender_raw}'"))
    })?;

    let scan_type_raw = submission.scan_type.as_deref().expect("checked above");
    let scan_type = ScanType::parse(scan_type_raw).ok_or_else(|| {
        ReportError::InvalidInput(format!("unknown scan type '{scan_type_raw}'"))
    })?;

    let scan_file_name = submission
        .scan_file_name
        .as_deref()
        .expect("checked above")
        .to_owned();
    validate_scan_file_name(&scan_file_name)?;

    let clinical_notes = submission
        .clinical_notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned);

    Ok(ValidatedSubmission {
        patient_name,
        age,
        gender,
        scan_type,
        scan_file_name,
        clinical_notes,
        image_url: submission.image_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_submission() -> ScanSubmission {
        ScanSubmission {
            patient_name: Some("Jane Doe".into()),
            age: Some(54),
            gender: Some("female".into()),
            scan_type: Some("xray".into()),
            scan_file_name: Some("chest.png".into()),
            clinical_notes: Some("Shortness of breath on exertion.".into()),
            image_url: None,
        }
    }

    #[test]
    fn complete_submission_validates() {
        let validated = validate_submission(&complete_submission()).unwrap();
        assert_eq!(validated.patient_name.as_str(), "Jane Doe");
        assert_eq!(validated.age, 54);
        assert_eq!(validated.gender, Gender::Female);
        assert_eq!(validated.scan_type, ScanType::Xray);
    }

    #[test]
    fn all_missing_fields_are_reported_together() {
        let err = validate_submission(&ScanSubmission::default()).unwrap_err();
        let message = err.to_string();
        for field in ["patientName", "age", "gender", "scanType", "scanFile"] {
            assert!(message.contains(field), "missing '{field}' in: {message}");
        }
    }

    #[test]
    fn whitespace_only_name_counts_as_missing() {
        let mut submission = complete_submission();
        submission.patient_name = Some("   ".into());
        let err = validate_submission(&submission).unwrap_err();
        assert!(err.to_string().contains("patientName"));
    }

    #[test]
    fn age_bounds_are_enforced() {
        let mut submission = complete_submission();
        submission.age = Some(0);
        assert!(validate_submission(&submission).is_err());
        submission.age = Some(131);
        assert!(validate_submission(&submission).is_err());
        submission.age = Some(130);
        assert!(validate_submission(&submission).is_ok());
    }

    #[test]
    fn legacy_ecg_code_is_accepted_as_scan_type() {
        let mut submission = complete_submission();
        submission.scan_type = Some("ecg".into());
        let validated = validate_submission(&submission).unwrap();
        assert_eq!(validated.scan_type, ScanType::Echo);
    }

    #[test]
    fn scan_file_extensions_are_whitelisted() {
        assert!(validate_scan_file_name("scan.png").is_ok());
        assert!(validate_scan_file_name("scan.JPEG").is_ok());
        assert!(validate_scan_file_name("study.dcm").is_ok());
        assert!(validate_scan_file_name("study.dicom").is_ok());
        assert!(validate_scan_file_name("report.pdf").is_err());
        assert!(validate_scan_file_name("malware.exe").is_err());
        assert!(validate_scan_file_name("no-extension").is_err());
    }

    #[test]
    fn empty_clinical_notes_become_none() {
        let mut submission = complete_submission();
        submission.clinical_notes = Some("   ".into());
        let validated = validate_submission(&submission).unwrap();
        assert!(validated.clinical_notes.is_none());
    }
}
