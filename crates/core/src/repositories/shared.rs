//! Shared storage plumbing for the record repositories.

use crate::error::{ReportError, ReportResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialises `record` as pretty JSON into `dir/file_name`, creating the
/// directory chain first.
pub(crate) fn write_json_record<T: Serialize>(
    dir: &Path,
    file_name: &str,
    record: &T,
) -> ReportResult<()> {
    fs::create_dir_all(dir).map_err(ReportError::RecordDirCreation)?;
    let json = serde_json::to_string_pretty(record).map_err(ReportError::Serialization)?;
    fs::write(dir.join(file_name), json).map_err(ReportError::FileWrite)
}

/// Reads and deserialises one record document.
pub(crate) fn read_json_record<T: DeserializeOwned>(path: &Path) -> ReportResult<T> {
    let contents = fs::read_to_string(path).map_err(ReportError::FileRead)?;
    serde_json::from_str(&contents).map_err(ReportError::Deserialization)
}

/// Walks the sharded tree under `base_dir` (`<s1>/<s2>/<uuid>/<file_name>`)
/// and collects every parseable record.
///
/// A missing base directory yields an empty list. Individual documents that
/// cannot be read or parsed are logged and skipped; one corrupt record must
/// never take down the listing.
pub(crate) fn collect_records<T: DeserializeOwned>(base_dir: &Path, file_name: &str) -> Vec<T> {
    let mut records = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(_) => return records,
    };
    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };
        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };
            for id_entry in id_iter.flatten() {
                let record_path = id_entry.path().join(file_name);
                if !record_path.is_file() {
                    continue;
                }

                match read_json_record::<T>(&record_path) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::warn!("skipping unreadable record {}: {e}", record_path.display());
                    }
                }
            }
        }
    }

    records
}
