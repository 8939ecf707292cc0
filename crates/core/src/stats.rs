//! Platform-wide report statistics.

use crate::report::{Report, ScanType};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use utoipa::ToSchema;

/// Aggregate numbers for the landing dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Count of all persisted reports.
    pub total_reports: usize,
    /// Mean analysis confidence across all reports, rounded to one decimal.
    /// Zero when no reports exist.
    pub average_accuracy: f64,
    /// Number of distinct patients, by trimmed case-insensitive name.
    pub unique_patients: usize,
    /// Reports per imaging modality, keyed by display label. Every modality
    /// appears, including those with zero reports.
    pub platform_usage: BTreeMap<String, usize>,
}

impl PlatformStats {
    /// Computes the statistics over the full report set.
    pub fn compute(reports: &[Report]) -> Self {
        let total_reports = reports.len();

        let average_accuracy = if reports.is_empty() {
            0.0
        } else {
            let sum: f64 = reports.iter().map(|r| r.confidence.value()).sum();
            round_one_decimal(sum / reports.len() as f64)
        };

        let unique_patients = reports
            .iter()
            .map(|r| r.patient_name.trim().to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        let mut platform_usage: BTreeMap<String, usize> = ScanType::ALL
            .iter()
            .map(|scan_type| (scan_type.label().to_owned(), 0))
            .collect();
        for report in reports {
            if let Some(count) = platform_usage.get_mut(report.scan_type.label()) {
                *count += 1;
            }
        }

        Self {
            total_reports,
            average_accuracy,
            unique_patients,
            platform_usage,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Gender, RiskLevel, ScanStatus};
    use crate::uuid::ShardableUuid;
    use cardioscan_types::Confidence;
    use chrono::Utc;

    fn report(patient: &str, scan_type: ScanType, confidence: f64) -> Report {
        Report {
            id: ShardableUuid::new(),
            patient_name: patient.into(),
            age: 50,
            gender: Gender::Other,
            scan_type,
            status: ScanStatus::Normal,
            risk_level: RiskLevel::Low,
            confidence: Confidence::new(confidence).unwrap(),
            diagnosis: "Normal Findings".into(),
            details: None,
            clinical_notes: None,
            recommendations: vec![],
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_set_yields_zeroed_stats() {
        let stats = PlatformStats::compute(&[]);
        assert_eq!(stats.total_reports, 0);
        assert_eq!(stats.average_accuracy, 0.0);
        assert_eq!(stats.unique_patients, 0);
        assert!(stats.platform_usage.values().all(|&count| count == 0));
        assert_eq!(stats.platform_usage.len(), ScanType::ALL.len());
    }

    #[test]
    fn average_accuracy_is_rounded_to_one_decimal() {
        let reports = vec![
            report("A", ScanType::Xray, 98.7),
            report("B", ScanType::Ct, 96.5),
            report("C", ScanType::Mri, 94.3),
        ];
        let stats = PlatformStats::compute(&reports);
        // (98.7 + 96.5 + 94.3) / 3 = 96.5
        assert_eq!(stats.average_accuracy, 96.5);
        assert_eq!(stats.total_reports, 3);
    }

    #[test]
    fn patients_are_deduplicated_case_insensitively() {
        let reports = vec![
            report("Jane Doe", ScanType::Xray, 95.0),
            report("  jane doe ", ScanType::Ct, 95.0),
            report("John Roe", ScanType::Ct, 95.0),
        ];
        let stats = PlatformStats::compute(&reports);
        assert_eq!(stats.unique_patients, 2);
    }

    #[test]
    fn platform_usage_is_keyed_by_display_label() {
        let reports = vec![
            report("A", ScanType::Echo, 95.0),
            report("B", ScanType::Echo, 95.0),
            report("C", ScanType::Xray, 95.0),
        ];
        let stats = PlatformStats::compute(&reports);
        assert_eq!(stats.platform_usage["Echocardiogram"], 2);
        assert_eq!(stats.platform_usage["X-Ray"], 1);
        assert_eq!(stats.platform_usage["MRI"], 0);
        assert_eq!(stats.platform_usage["CT Scan"], 0);
    }
}
