//! Local filtering and search over lists already held in memory.

use grievance_types::{Complaint, ComplaintFilter, Officer};

/// True if `complaint` satisfies every criterion set on `filter`.
pub fn matches_filter(complaint: &Complaint, filter: &ComplaintFilter) -> bool {
    if filter.status.is_some_and(|s| s != complaint.status) {
        return false;
    }
    if filter.priority.is_some_and(|p| p != complaint.priority) {
        return false;
    }
    if filter
        .department
        .is_some_and(|d| d != complaint.assigned_department)
    {
        return false;
    }
    if filter.category.is_some() && filter.category != complaint.category {
        return false;
    }
    if let Some(assignee) = &filter.assigned_to_id {
        if complaint.assigned_to_id.as_deref() != Some(assignee.as_str()) {
            return false;
        }
    }
    match filter.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => matches_search(complaint, term),
        _ => true,
    }
}

/// Case-insensitive substring match over the fields a citizen or officer
/// would type from memory.
pub fn matches_search(complaint: &Complaint, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        Some(complaint.subject.as_str()),
        Some(complaint.description.as_str()),
        Some(complaint.complaint_number.as_str()),
        complaint.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Officers that may be offered as assignment targets, narrowed by `term`.
/// Unapproved officers are never returned.
pub fn filter_officers<'a>(officers: &'a [Officer], term: Option<&str>) -> Vec<&'a Officer> {
    let needle = term.map(|t| t.trim().to_lowercase()).unwrap_or_default();
    officers
        .iter()
        .filter(|o| o.is_assignable())
        .filter(|o| {
            needle.is_empty()
                || o.name.to_lowercase().contains(&needle)
                || o.employee_id.to_lowercase().contains(&needle)
                || o
                    .designation
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}
