use crate::model::UserRecord;

/// Persistence seam for user rows.
///
/// Rows are keyed by a surrogate id, which `list_all` exposes alongside
/// each record. `update` rewrites exactly the row carrying the given id; it
/// never re-locates the target by the record's own keys, so two rows that
/// share a `user_name` or `email` stay distinct. `insert` appends under a
/// fresh id.
///
/// Errors are plain strings at this seam; the reconciler wraps them into
/// `ImportError::Persistence`.
pub trait UserStore {
    fn list_all(&self) -> Result<Vec<(u64, UserRecord)>, String>;
    fn update(&mut self, id: u64, record: UserRecord) -> Result<(), String>;
    fn insert(&mut self, record: UserRecord) -> Result<(), String>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Vec-backed store. Reference implementation of the row addressing rules,
/// and the store used by engine tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<(u64, UserRecord)>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with pre-existing rows, assigning ids in order.
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        let mut store = Self::default();
        for record in records {
            store.push(record);
        }
        store
    }

    fn push(&mut self, record: UserRecord) {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push((id, record));
    }

    /// Stored records in id order, for assertions.
    pub fn rows(&self) -> impl Iterator<Item = &UserRecord> {
        self.rows.iter().map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl UserStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<(u64, UserRecord)>, String> {
        Ok(self.rows.clone())
    }

    fn update(&mut self, id: u64, record: UserRecord) -> Result<(), String> {
        match self.rows.iter_mut().find(|(row_id, _)| *row_id == id) {
            Some((_, row)) => {
                *row = record;
                Ok(())
            }
            None => Err(format!("no user row with id {id}")),
        }
    }

    fn insert(&mut self, record: UserRecord) -> Result<(), String> {
        self.push(record);
        Ok(())
    }
}
