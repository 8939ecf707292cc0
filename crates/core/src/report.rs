//! The report domain model.
//!
//! A [`Report`] is a persisted diagnosis record tied to one scan and one
//! patient. Reports are read-only projections once created: the service never
//! mutates or deletes them, and new reports enter the system only through the
//! diagnosis-submission flow.
//!
//! ## Classification axes
//!
//! - [`ScanStatus`] is the clinical bucket used for dashboard colouring.
//! - [`RiskLevel`] is a separate severity axis shown alongside the status.
//!
//! The two are deliberately independent: a record may be `abnormal` with a
//! `Low` risk level. No correlation is enforced.

use crate::uuid::ShardableUuid;
use cardioscan_types::Confidence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Clinical status bucket of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Normal,
    Abnormal,
    Critical,
}

impl ScanStatus {
    /// All status values, in dashboard-tile order.
    pub const ALL: [ScanStatus; 3] = [ScanStatus::Normal, ScanStatus::Abnormal, ScanStatus::Critical];

    /// The lowercase wire code for this status.
    pub fn code(&self) -> &'static str {
        match self {
            ScanStatus::Normal => "normal",
            ScanStatus::Abnormal => "abnormal",
            ScanStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ScanStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ScanStatus::Normal),
            "abnormal" => Ok(ScanStatus::Abnormal),
            "critical" => Ok(ScanStatus::Critical),
            _ => Err(()),
        }
    }
}

/// Severity axis shown alongside the clinical status.
///
/// Serialized capitalised ("Low"/"Moderate"/"High"), matching the analysis
/// result table; parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            _ => Err(()),
        }
    }
}

/// Patient gender as captured by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Capitalised display form (the stored wire form is lowercase).
    pub fn display(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

/// Imaging modality of a scan.
///
/// This enum is the single source of truth for every representation of a
/// modality: the canonical wire code, the display label, and the accepted
/// parse aliases. Filter codes and label mapping can therefore never use
/// different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
pub enum ScanType {
    Xray,
    Ct,
    Mri,
    Echo,
}

impl ScanType {
    /// All modalities, in form/display order.
    pub const ALL: [ScanType; 4] = [ScanType::Xray, ScanType::Ct, ScanType::Mri, ScanType::Echo];

    /// Canonical lowercase wire/filter code.
    pub fn code(&self) -> &'static str {
        match self {
            ScanType::Xray => "xray",
            ScanType::Ct => "ct",
            ScanType::Mri => "mri",
            ScanType::Echo => "echo",
        }
    }

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            ScanType::Xray => "X-Ray",
            ScanType::Ct => "CT Scan",
            ScanType::Mri => "MRI",
            ScanType::Echo => "Echocardiogram",
        }
    }

    /// Parses a modality from a code, display label, or legacy alias.
    ///
    /// The legacy wire code `ecg` (submitted by older clients for
    /// echocardiograms) maps to [`ScanType::Echo`]. Matching is
    /// case-insensitive.
    pub fn parse(input: &str) -> Option<Self> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "xray" | "x-ray" => Some(ScanType::Xray),
            "ct" | "ct scan" => Some(ScanType::Ct),
            "mri" => Some(ScanType::Mri),
            "echo" | "ecg" | "echocardiogram" => Some(ScanType::Echo),
            _ => None,
        }
    }
}

impl fmt::Display for ScanType {
    // Reports render modalities for humans far more often than for the wire,
    // so Display uses the label rather than the code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScanType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScanType::parse(s).ok_or(())
    }
}

impl Serialize for ScanType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ScanType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ScanType::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown scan type '{s}'")))
    }
}

/// A persisted diagnosis record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Canonical 32-hex record identifier.
    #[schema(value_type = String)]
    pub id: ShardableUuid,
    pub patient_name: String,
    pub age: u16,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub status: ScanStatus,
    pub risk_level: RiskLevel,
    /// Analysis confidence percentage, always within `[0, 100]`.
    #[schema(value_type = f64)]
    pub confidence: Confidence,
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    /// Data URL or remote URL of the scan preview, when one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// The scan date formatted for display, e.g. `Jan 5, 2026`.
    pub fn scan_date(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}
