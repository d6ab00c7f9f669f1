// CSV roster import

use rollcall_engine::{ImportError, UserRecord};

use crate::{apply_field, map_header, ParseOutcome};

/// Read roster records from delimited-text bytes.
///
/// The first non-blank record is the header; later records zip against it
/// positionally, up to the shorter of the two lengths. A record the reader
/// cannot produce, or one holding invalid UTF-8 in any cell, is dropped
/// whole and reading continues with the next row. A file with no header
/// yields an empty outcome, not an error.
pub fn read_records(bytes: &[u8]) -> Result<ParseOutcome, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut outcome = ParseOutcome::default();
    let mut header: Option<Vec<(usize, &'static str)>> = None;

    for result in reader.byte_records() {
        let record = result.ok();
        let Some(cells) = record.as_ref().and_then(decode_cells) else {
            // Reader error or invalid UTF-8: one row lost, file continues.
            if header.is_some() {
                outcome.data_rows += 1;
                outcome.skipped_malformed += 1;
            }
            continue;
        };

        let Some(columns) = &header else {
            if cells.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            header = Some(map_header(cells.iter().copied()));
            continue;
        };

        outcome.data_rows += 1;
        if cells.iter().all(|c| c.trim().is_empty()) {
            outcome.skipped_blank += 1;
            continue;
        }

        let mut record = UserRecord::default();
        for &(idx, name) in columns {
            // A short row leaves its trailing columns absent.
            if let Some(value) = cells.get(idx) {
                apply_field(&mut record, name, value.trim());
            }
        }
        record.is_active = true;
        outcome.records.push(record);
    }

    Ok(outcome)
}

/// All cells of a record as text, or `None` when any cell is not UTF-8.
fn decode_cells(record: &csv::ByteRecord) -> Option<Vec<&str>> {
    record.iter().map(|cell| std::str::from_utf8(cell).ok()).collect()
}
