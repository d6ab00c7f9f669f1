use crate::model::{MatchPartition, UserRecord};

/// True when an alternate-key value is missing or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Alternate-key equality: both sides present and non-blank, compared
/// case-sensitively. Blank never matches blank, so keyless records cannot
/// pair up with each other.
pub fn key_eq(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.trim().is_empty() && !b.trim().is_empty() && a == b,
        _ => false,
    }
}

/// Index of the first existing record sharing a non-blank `user_name` or
/// `email` with `record`, in existing-set order.
pub fn find_match(record: &UserRecord, existing: &[UserRecord]) -> Option<usize> {
    existing.iter().position(|e| {
        key_eq(record.user_name.as_deref(), e.user_name.as_deref())
            || key_eq(record.email.as_deref(), e.email.as_deref())
    })
}

/// Split `incoming` into records that already exist (by either alternate
/// key) and records that do not. Read-only; safe to call repeatedly.
pub fn partition(incoming: &[UserRecord], existing: &[UserRecord]) -> MatchPartition {
    let mut out = MatchPartition::default();
    for record in incoming {
        if find_match(record, existing).is_some() {
            out.matched.push(record.clone());
        } else {
            out.unmatched.push(record.clone());
        }
    }
    out
}
