//! Answer formatting for matched knowledge records.
//!
//! Turns the raw chunk the index matched into a human-readable answer,
//! entity-aware: when the query names a specific member of the record,
//! the answer leads with that member's affiliation.

use crate::models::Record;

/// Format a matched chunk into an answer for `query`.
///
/// Two shapes:
/// - **Member-specific** — some member's name occurs (case-insensitive
///   substring) in the query: `<member> belongs to <label>.` followed by
///   the record's full member list, bulleted.
/// - **Label-generic** (default) — `<label> Players:` followed by the
///   bulleted member list.
///
/// Matching is by substring, so a member name contained in another
/// member's name can match a query meant for the longer name; the first
/// member in list order wins. A record with no members produces the
/// header line with no bullets.
pub fn format_answer(chunk: &str, query: &str) -> String {
    let record = Record::parse(chunk);
    let query_lower = query.to_lowercase();

    let named = record
        .members
        .iter()
        .find(|member| query_lower.contains(&member.to_lowercase()));

    let mut response = String::new();

    if let Some(member) = named {
        response.push_str(&format!("{} belongs to {}.\n\n", member, record.label));
    }

    response.push_str(&format!("{} Players:\n", record.label));
    for member in &record.members {
        response.push_str(&format!("• {}\n", member));
    }

    response
}
