use chrono::{DateTime, Utc};

use crate::error::ImportError;
use crate::matcher::{find_match, is_blank};
use crate::model::{ImportSummary, UserRecord};
use crate::store::UserStore;

/// Apply `incoming` to the store in upload order.
///
/// Matched records merge into the existing row; unmatched records with both
/// alternate keys present are created; the rest are skipped. The existing
/// set is snapshotted once up front and mutated as merges land, so later
/// rows in the same upload observe earlier merges. Created rows are not
/// added to the snapshot: a second row with the same new key reconciles as
/// another create and lands as its own store row.
///
/// Merges are written back under the matched snapshot row's id, never
/// re-located by key, so a store row that happens to share a key with the
/// matched one is left alone. Writes go through the store one record at a
/// time. A store failure aborts the run; rows already written stay written.
pub fn reconcile<S: UserStore + ?Sized>(
    incoming: &[UserRecord],
    store: &mut S,
) -> Result<ImportSummary, ImportError> {
    let (ids, mut snapshot): (Vec<u64>, Vec<UserRecord>) = store
        .list_all()
        .map_err(ImportError::Persistence)?
        .into_iter()
        .unzip();
    let now = Utc::now();
    let mut summary = ImportSummary::default();

    for record in incoming {
        match find_match(record, &snapshot) {
            Some(i) => {
                merge_into(&mut snapshot[i], record, now);
                store
                    .update(ids[i], snapshot[i].clone())
                    .map_err(ImportError::Persistence)?;
                summary.updated += 1;
            }
            None => {
                if is_blank(record.user_name.as_deref()) || is_blank(record.email.as_deref()) {
                    summary.skipped += 1;
                    continue;
                }
                let mut created = record.clone();
                created.created_at = Some(now);
                created.is_active = true;
                store.insert(created).map_err(ImportError::Persistence)?;
                summary.created += 1;
            }
        }
    }

    Ok(summary)
}

/// Merge an incoming record into an existing row.
///
/// Incoming values win only where present; `Some("")` counts as present and
/// clears the field. `updated_by` is assigned unconditionally, absent or
/// not, so the importing actor is always recorded. `user_name`,
/// `created_by`, `created_at` and `is_active` are never touched on update.
fn merge_into(existing: &mut UserRecord, incoming: &UserRecord, now: DateTime<Utc>) {
    if incoming.email.is_some() {
        existing.email = incoming.email.clone();
    }
    if incoming.password.is_some() {
        existing.password = incoming.password.clone();
    }
    if incoming.address.is_some() {
        existing.address = incoming.address.clone();
    }
    if incoming.contact.is_some() {
        existing.contact = incoming.contact.clone();
    }
    if incoming.about.is_some() {
        existing.about = incoming.about.clone();
    }
    if incoming.photo_path.is_some() {
        existing.photo_path = incoming.photo_path.clone();
    }
    if incoming.role_id.is_some() {
        existing.role_id = incoming.role_id;
    }
    existing.updated_by = incoming.updated_by.clone();
    existing.updated_at = Some(now);
}
