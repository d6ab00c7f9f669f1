// Excel roster import (xlsx, xls)

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use rollcall_engine::{ImportError, UserRecord};

use crate::{apply_field, map_header, ParseOutcome};

/// Read roster records from workbook bytes. Only the first worksheet is
/// consulted; the first row of its used range is the header.
///
/// An error cell under a recognized column drops that row and reading
/// continues. A container that cannot be opened aborts the whole parse.
pub fn read_records(bytes: &[u8]) -> Result<ParseOutcome, ImportError> {
    let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::Spreadsheet(e.to_string()))?;

    let mut outcome = ParseOutcome::default();

    let range = match workbook.worksheet_range_at(0) {
        Some(result) => result.map_err(|e| ImportError::Spreadsheet(e.to_string()))?,
        // A workbook with no sheets reads like a file with no header.
        None => return Ok(outcome),
    };

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(outcome);
    };
    let header_cells: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let columns = map_header(header_cells.iter().map(|s| s.as_str()));

    for row in rows {
        outcome.data_rows += 1;
        if row.iter().all(is_blank_cell) {
            outcome.skipped_blank += 1;
            continue;
        }
        match row_record(row, &columns) {
            Some(record) => outcome.records.push(record),
            None => outcome.skipped_malformed += 1,
        }
    }

    Ok(outcome)
}

/// Build one record from a data row, or `None` when an error cell sits
/// under a schema column. Unlike delimited text, the range is rectangular,
/// so every mapped column yields a present value (possibly empty).
fn row_record(row: &[Data], columns: &[(usize, &'static str)]) -> Option<UserRecord> {
    let mut record = UserRecord::default();
    for &(idx, name) in columns {
        let cell = row.get(idx).unwrap_or(&Data::Empty);
        apply_field(&mut record, name, &cell_text(cell)?);
    }
    record.is_active = true;
    Some(record)
}

/// Empty cell or text that trims to nothing. Error cells are not blank.
fn is_blank_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Cell content as trimmed text, the way a grid displays it: integral
/// floats without a decimal point, booleans as TRUE/FALSE, date-times as
/// their serial value. `None` marks an error cell.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => return None,
    };
    Some(text.trim().to_string())
}
