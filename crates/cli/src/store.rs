// JSON-file user store.
//
// The store is one JSON array of user records; a row's position in the
// array is its surrogate id. Rows are only ever appended or rewritten in
// place, so ids stay stable for the life of the file. Every write saves
// the file back, so a run that aborts midway leaves the rows it already
// reconciled on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rollcall_engine::{UserRecord, UserStore};

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    rows: Vec<UserRecord>,
}

impl JsonStore {
    /// Open a store file. A missing or blank file is an empty store; the
    /// file itself appears on the first write.
    pub fn open(path: &Path) -> Result<Self, String> {
        let rows = match fs::read(path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| format!("{}: not a valid store file: {}", path.display(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(format!("{}: {}", path.display(), e)),
        };
        Ok(Self { path: path.to_path_buf(), rows })
    }

    fn save(&self) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.rows).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| format!("{}: {}", self.path.display(), e))
    }
}

impl UserStore for JsonStore {
    fn list_all(&self) -> Result<Vec<(u64, UserRecord)>, String> {
        Ok(self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i as u64, row.clone()))
            .collect())
    }

    fn update(&mut self, id: u64, record: UserRecord) -> Result<(), String> {
        match self.rows.get_mut(id as usize) {
            Some(row) => *row = record,
            None => return Err(format!("no user row with id {id}")),
        }
        self.save()
    }

    fn insert(&mut self, record: UserRecord) -> Result<(), String> {
        self.rows.push(record);
        self.save()
    }
}
