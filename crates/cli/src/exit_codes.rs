//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; wrapper scripts branch on
//! them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (clap emits this itself) |
//! | 3       | Files     | Local file I/O (roster, staged, output)  |
//! | 10-19   | Import    | Roster import pipeline codes             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map it in `import_exit_code` if it comes from an `ImportError`

use rollcall_engine::ImportError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Reading or writing a local file failed (the roster upload, the staged
/// batch, or a template output path). Store files have their own code.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Import (10-19)
// =============================================================================

/// File extension is not .csv, .xlsx, or .xls.
pub const EXIT_IMPORT_UNSUPPORTED: u8 = 10;

/// Upload was empty, or no records survived parsing.
pub const EXIT_IMPORT_EMPTY: u8 = 11;

/// No staged batch to commit, or the staged blob failed to decode.
pub const EXIT_IMPORT_TRANSFER: u8 = 12;

/// Store read or write failed.
pub const EXIT_IMPORT_STORE: u8 = 13;

/// Spreadsheet container could not be opened (corrupt or mislabeled).
pub const EXIT_IMPORT_WORKBOOK: u8 = 14;

/// Map an ImportError to its exit code.
pub fn import_exit_code(err: &ImportError) -> u8 {
    match err {
        ImportError::UnsupportedFormat(_) => EXIT_IMPORT_UNSUPPORTED,
        ImportError::EmptyInput => EXIT_IMPORT_EMPTY,
        ImportError::Spreadsheet(_) => EXIT_IMPORT_WORKBOOK,
        ImportError::TransferMissing => EXIT_IMPORT_TRANSFER,
        ImportError::Staging(_) => EXIT_IMPORT_TRANSFER,
        ImportError::Persistence(_) => EXIT_IMPORT_STORE,
    }
}
