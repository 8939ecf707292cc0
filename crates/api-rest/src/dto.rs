//! Wire DTOs for the REST surface.
//!
//! Field names are camelCase to match the dashboard client's existing
//! contract.

use cardioscan_core::{
    DashboardCounts, PlatformStats, ProfileUpdate, Report, ScanSubmission, User,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `POST /auth` request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /auth` response body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRes {
    pub access_token: String,
    pub roles: Vec<String>,
}

/// `POST /users` request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Profile projection of a stored account. The password hash never leaves
/// the storage layer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRes {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub roles: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for ProfileRes {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name,
            specialty: user.specialty,
            hospital: user.hospital,
            phone: user.phone,
            roles: user.roles,
            created_at: user.created_at,
        }
    }
}

/// `PATCH /users/profile` request body; only present fields are updated.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileReq {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub hospital: Option<String>,
    pub phone: Option<String>,
}

impl From<UpdateProfileReq> for ProfileUpdate {
    fn from(req: UpdateProfileReq) -> Self {
        ProfileUpdate {
            name: req.name,
            specialty: req.specialty,
            hospital: req.hospital,
            phone: req.phone,
        }
    }
}

/// `POST /reports` request body: the diagnosis submission.
///
/// Everything is optional at the wire level; required-field checking happens
/// in core validation so that all missing fields are reported together.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportReq {
    pub patient_name: Option<String>,
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub scan_type: Option<String>,
    pub scan_file_name: Option<String>,
    pub clinical_notes: Option<String>,
    pub image_url: Option<String>,
}

impl From<CreateReportReq> for ScanSubmission {
    fn from(req: CreateReportReq) -> Self {
        ScanSubmission {
            patient_name: req.patient_name,
            age: req.age,
            gender: req.gender,
            scan_type: req.scan_type,
            scan_file_name: req.scan_file_name,
            clinical_notes: req.clinical_notes,
            image_url: req.image_url,
        }
    }
}

/// Optional query parameters of `GET /reports`.
///
/// With no parameters the full set is returned, preserving the original
/// contract; any present parameter switches the response to the filtered,
/// paged history view. Malformed filter values fall back to `all`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportsQuery {
    pub status: Option<String>,
    pub scan_type: Option<String>,
    pub period: Option<String>,
    pub page: Option<usize>,
}

impl ReportsQuery {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.scan_type.is_none()
            && self.period.is_none()
            && self.page.is_none()
    }
}

/// `GET /reports` response body.
///
/// `counts` always reflects the entire report set, independent of filters.
/// The pagination fields appear only for the filtered, paged view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportsRes {
    pub reports: Vec<Report>,
    pub counts: DashboardCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_filtered: Option<usize>,
}

/// `GET /reports/stats` response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsRes {
    pub stats: PlatformStats,
}
