// End-to-end import flow: file bytes -> parse -> preview -> stage -> confirm.
//
// These tests drive the same pipeline the CLI wires together, minus the
// filesystem: rollcall_io parses the upload, rollcall_engine partitions it,
// stages it as a blob, and reconciles it into a store.

use rollcall_engine::matcher::partition;
use rollcall_engine::staging;
use rollcall_engine::template::{TEMPLATE_CSV, TEMPLATE_FILE_NAME};
use rollcall_engine::{reconcile, ImportError, ImportSummary, MemoryStore, UserRecord, UserStore};
use rollcall_io::parse_named;

use rust_xlsxwriter::Workbook;

fn user(name: &str, email: &str) -> UserRecord {
    UserRecord {
        user_name: (!name.is_empty()).then(|| name.to_string()),
        email: (!email.is_empty()).then(|| email.to_string()),
        ..UserRecord::default()
    }
}

// =========================================================================
// CSV upload, start to finish
// =========================================================================

#[test]
fn csv_upload_creates_updates_and_skips() {
    let mut existing = user("ivy", "ivy@example.com");
    existing.password = Some("keep-me".into());
    let mut store = MemoryStore::with_records(vec![existing]);

    // Row 1 updates ivy by email, row 2 is new, row 3 has no usable key.
    let csv = "UserName,Email,Password,Address,Contact,About,PhotoPath,CreatedBy,UpdatedBy,RoleId\n\
               ,ivy@example.com,,12 Elm St,555-0100,,,admin,admin,2\n\
               noah,noah@example.com,pw2,9 Oak Ave,555-0101,new hire,,admin,admin,3\n\
               ,,pw3,1 Pine Rd,555-0102,orphan row,,admin,admin,2\n";

    let outcome = parse_named("roster.csv", csv.as_bytes()).unwrap();
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.data_rows, 3);

    let snapshot: Vec<UserRecord> =
        store.list_all().unwrap().into_iter().map(|(_, row)| row).collect();
    let preview = partition(&outcome.records, &snapshot);
    assert_eq!(preview.matched.len(), 1);
    assert_eq!(preview.unmatched.len(), 2);

    let blob = staging::encode(&outcome.records).unwrap();
    let staged = staging::decode(&blob).unwrap();
    let summary = reconcile(&staged, &mut store).unwrap();

    assert_eq!(summary, ImportSummary { created: 1, updated: 1, skipped: 1 });
    assert_eq!(summary.to_string(), "Added: 1, Updated: 1, Skipped: 1");

    let rows: Vec<_> = store.rows().collect();
    assert_eq!(rows.len(), 2);
    // Present-but-empty password overwrites; absent would have kept it.
    assert_eq!(rows[0].address.as_deref(), Some("12 Elm St"));
    assert_eq!(rows[0].password.as_deref(), Some(""));
    assert_eq!(rows[0].role_id, Some(2));
    assert_eq!(rows[1].user_name.as_deref(), Some("noah"));
    assert_eq!(rows[1].role_id, Some(3));
    assert!(rows[1].is_active);
}

#[test]
fn csv_short_rows_leave_trailing_fields_untouched_after_merge() {
    let mut existing = user("ivy", "ivy@example.com");
    existing.role_id = Some(7);
    existing.about = Some("original bio".into());
    let mut store = MemoryStore::with_records(vec![existing]);

    // Ragged row ends after Email: About and RoleId come through absent.
    let csv = "UserName,Email,Password,Address,Contact,About,PhotoPath,CreatedBy,UpdatedBy,RoleId\n\
               ivy,ivy@example.com\n";

    let outcome = parse_named("roster.csv", csv.as_bytes()).unwrap();
    let summary = reconcile(&outcome.records, &mut store).unwrap();
    assert_eq!(summary.updated, 1);

    let rows: Vec<_> = store.rows().collect();
    assert_eq!(rows[0].about.as_deref(), Some("original bio"));
    assert_eq!(rows[0].role_id, Some(7));
}

// =========================================================================
// Spreadsheet upload, start to finish
// =========================================================================

fn workbook_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, *cell).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

#[test]
fn xlsx_upload_flows_through_the_same_pipeline() {
    let mut store = MemoryStore::with_records(vec![user("ivy", "ivy@example.com")]);

    let bytes = workbook_bytes(&[
        &["UserName", "Email", "RoleId"],
        &["ivy", "ivy@example.com", "4"],
        &["noah", "noah@example.com", "5"],
    ]);

    let outcome = parse_named("roster.xlsx", &bytes).unwrap();
    assert_eq!(outcome.records.len(), 2);

    let snapshot: Vec<UserRecord> =
        store.list_all().unwrap().into_iter().map(|(_, row)| row).collect();
    let preview = partition(&outcome.records, &snapshot);
    assert_eq!(preview.matched.len(), 1);
    assert_eq!(preview.unmatched.len(), 1);

    let blob = staging::encode(&outcome.records).unwrap();
    let summary = reconcile(&staging::decode(&blob).unwrap(), &mut store).unwrap();
    assert_eq!(summary, ImportSummary { created: 1, updated: 1, skipped: 0 });

    let rows: Vec<_> = store.rows().collect();
    assert_eq!(rows[0].role_id, Some(4));
    assert_eq!(rows[1].email.as_deref(), Some("noah@example.com"));
}

#[test]
fn unsupported_extension_is_rejected_before_parsing() {
    let err = parse_named("roster.pdf", b"whatever").unwrap_err();
    match err {
        ImportError::UnsupportedFormat(ext) => assert_eq!(ext, "pdf"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

// =========================================================================
// Template round trip
// =========================================================================

#[test]
fn template_parses_back_into_two_sample_users() {
    let outcome = parse_named(TEMPLATE_FILE_NAME, TEMPLATE_CSV.as_bytes()).unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.skipped_blank, 0);
    assert_eq!(outcome.skipped_malformed, 0);

    let john = &outcome.records[0];
    assert_eq!(john.user_name.as_deref(), Some("john_doe"));
    assert_eq!(john.email.as_deref(), Some("john@example.com"));
    assert_eq!(john.photo_path.as_deref(), Some("photos/john.jpg"));
    assert_eq!(john.role_id, Some(1));
    // The sample rows ship with an empty UpdatedBy cell, not a missing one.
    assert_eq!(john.updated_by.as_deref(), Some(""));

    let mary = &outcome.records[1];
    assert_eq!(mary.user_name.as_deref(), Some("mary_smith"));
    assert_eq!(mary.role_id, Some(2));
}

#[test]
fn template_import_into_empty_store_creates_both_samples() {
    let mut store = MemoryStore::new();
    let outcome = parse_named(TEMPLATE_FILE_NAME, TEMPLATE_CSV.as_bytes()).unwrap();
    let summary = reconcile(&outcome.records, &mut store).unwrap();
    assert_eq!(summary, ImportSummary { created: 2, updated: 0, skipped: 0 });
    assert!(store.rows().all(|r| r.is_active && r.created_at.is_some()));
}
