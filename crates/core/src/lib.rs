//! # CardioScan Core
//!
//! Core business logic for the CardioScan diagnosis-report service.
//!
//! This crate contains pure domain operations and flat-file record storage:
//! - the report model and its classification axes
//! - report filtering, pagination and dashboard aggregation
//! - the classifier seam with its canned placeholder implementation
//! - diagnosis-submission validation
//! - sharded JSON storage for reports and user accounts
//! - platform statistics and printable report rendering
//!
//! **No API concerns**: authentication tokens, HTTP servers and wire DTOs
//! belong in `api-rest` and `api-shared`.

#![warn(rust_2018_idioms)]

pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod filter;
pub mod report;
pub mod repositories;
pub mod stats;
pub mod uuid;
pub mod validation;

pub use cardioscan_types::{Confidence, EmailAddress, NonEmptyText};
pub use classify::{CannedClassifier, Classifier, DiagnosisResult, PatientContext, ScanInput};
pub use config::CoreConfig;
pub use error::{ReportError, ReportResult};
pub use filter::{
    DashboardCounts, ReportBrowser, ReportFilters, ReportPage, ScanTypeFilter, StatusFilter,
    TimePeriodFilter,
};
pub use report::{Gender, Report, RiskLevel, ScanStatus, ScanType};
pub use repositories::{NewUser, ProfileUpdate, ReportService, User, UserService};
pub use stats::PlatformStats;
pub use crate::uuid::ShardableUuid;
pub use validation::{validate_submission, ScanSubmission, ValidatedSubmission};
