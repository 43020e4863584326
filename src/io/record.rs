//! Read customer record JSON files.
//!
//! A record file is a single JSON object keyed by the training column names
//! (`gender`, `SeniorCitizen`, ..., `tenure_group`), the same shape the form
//! produces.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::RawCustomerRecord;
use crate::error::ChurnError;

/// Read a customer record JSON file.
pub fn read_record_json(path: &Path) -> Result<RawCustomerRecord, ChurnError> {
    let file = File::open(path)?;
    let record: RawCustomerRecord = serde_json::from_reader(BufReader::new(file))?;
    Ok(record)
}
