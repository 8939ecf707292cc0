//! Workspace-wide constants.

/// Subdirectory of the data dir holding report records.
pub const REPORTS_DIR_NAME: &str = "reports";

/// Subdirectory of the data dir holding user records.
pub const USERS_DIR_NAME: &str = "users";

/// File name of the JSON document inside each report directory.
pub const REPORT_FILE_NAME: &str = "report.json";

/// File name of the JSON document inside each user directory.
pub const USER_FILE_NAME: &str = "user.json";

/// Fixed number of reports per page in the history view.
pub const REPORTS_PER_PAGE: usize = 10;

/// File extensions accepted for uploaded scan images.
///
/// Matches what the upload form accepts: common raster formats plus DICOM.
pub const ALLOWED_SCAN_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "tiff", "tif", "dcm", "dicom"];

/// Upper bound applied to the submitted patient age.
pub const MAX_PATIENT_AGE: u16 = 130;
