use std::fmt;

#[derive(Debug)]
pub enum ImportError {
    /// File extension maps to no supported reader.
    UnsupportedFormat(String),
    /// The uploaded file was empty or yielded no records.
    EmptyInput,
    /// Workbook container could not be opened or read.
    Spreadsheet(String),
    /// No staged preview to confirm.
    TransferMissing,
    /// Staged blob failed to encode or decode.
    Staging(String),
    /// The user store rejected a read or write.
    Persistence(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported file format '{ext}': expected .csv, .xlsx, or .xls")
            }
            Self::EmptyInput => write!(f, "no user records found in the file"),
            Self::Spreadsheet(msg) => write!(f, "spreadsheet read error: {msg}"),
            Self::TransferMissing => write!(f, "no staged records to confirm"),
            Self::Staging(msg) => write!(f, "staging error: {msg}"),
            Self::Persistence(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}
