// Roster file ingestion

use std::path::Path;

use rollcall_engine::{ImportError, UserRecord};
use serde::Serialize;

pub mod csv;
pub mod xlsx;

/// Fixed attribute schema: the only header names the importer recognizes.
/// Matching is exact and case-sensitive after trimming the header token.
pub const KNOWN_COLUMNS: [&str; 10] = [
    "UserName",
    "Email",
    "Password",
    "Address",
    "Contact",
    "About",
    "PhotoPath",
    "CreatedBy",
    "UpdatedBy",
    "RoleId",
];

/// Reader branch selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFormat {
    /// Comma-delimited text (`.csv`).
    Csv,
    /// Workbook container, modern or legacy (`.xlsx`, `.xls`).
    Spreadsheet,
}

impl ParseFormat {
    /// Map a file name to its reader by extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Result<Self, ImportError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Spreadsheet),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// Result of parsing one uploaded file.
#[derive(Debug, Default, Serialize)]
pub struct ParseOutcome {
    /// Normalized records, in source row order.
    pub records: Vec<UserRecord>,
    /// Rows seen after the header, including skipped ones.
    pub data_rows: usize,
    /// Rows skipped because every cell was blank.
    pub skipped_blank: usize,
    /// Rows dropped whole because a cell could not be read.
    pub skipped_malformed: usize,
}

impl ParseOutcome {
    /// One-line ingest summary for operators.
    pub fn summary(&self) -> String {
        let n = self.records.len();
        let mut parts = vec![format!("{} record{}", n, if n == 1 { "" } else { "s" })];
        if self.skipped_blank > 0 {
            parts.push(format!("{} blank skipped", self.skipped_blank));
        }
        if self.skipped_malformed > 0 {
            parts.push(format!("{} malformed skipped", self.skipped_malformed));
        }
        parts.join(" · ")
    }
}

/// Parse raw file bytes into normalized records.
pub fn parse(bytes: &[u8], format: ParseFormat) -> Result<ParseOutcome, ImportError> {
    match format {
        ParseFormat::Csv => csv::read_records(bytes),
        ParseFormat::Spreadsheet => xlsx::read_records(bytes),
    }
}

/// Parse with the format taken from the file name's extension.
pub fn parse_named(name: &str, bytes: &[u8]) -> Result<ParseOutcome, ImportError> {
    parse(bytes, ParseFormat::from_file_name(name)?)
}

/// Positions of recognized header tokens, in header order. Unknown tokens
/// are ignored. A duplicated token maps more than once and assignments
/// apply in order, so the rightmost value wins.
fn map_header<'a, I>(tokens: I) -> Vec<(usize, &'static str)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut columns = Vec::new();
    for (idx, token) in tokens.into_iter().enumerate() {
        let token = token.trim();
        if let Some(name) = KNOWN_COLUMNS.iter().find(|&&name| name == token) {
            columns.push((idx, *name));
        }
    }
    columns
}

/// Set one schema column on a record. String columns take the value as
/// given, empty included. `RoleId` is set only when the text parses as an
/// integer; a bad id reads as absent, never as zero.
fn apply_field(record: &mut UserRecord, column: &str, value: &str) {
    match column {
        "UserName" => record.user_name = Some(value.to_string()),
        "Email" => record.email = Some(value.to_string()),
        "Password" => record.password = Some(value.to_string()),
        "Address" => record.address = Some(value.to_string()),
        "Contact" => record.contact = Some(value.to_string()),
        "About" => record.about = Some(value.to_string()),
        "PhotoPath" => record.photo_path = Some(value.to_string()),
        "CreatedBy" => record.created_by = Some(value.to_string()),
        "UpdatedBy" => record.updated_by = Some(value.to_string()),
        "RoleId" => {
            if let Ok(id) = value.parse::<i64>() {
                record.role_id = Some(id);
            }
        }
        _ => {}
    }
}
