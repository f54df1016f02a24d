//! Navigation
//!
//! Which back-office menu entry is active, as a function of an explicit
//! current route.

/// A back-office menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Text shown in the menu
    pub label: String,

    /// Route the entry links to, e.g. `/admin/invoices`
    pub route: String,
}

impl MenuEntry {
    /// Create a new menu entry.
    pub fn new(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: route.into(),
        }
    }
}

/// Whether a menu route is active for the current path.
///
/// A route matches itself and any path below it, segment-wise: `/admin/rooms`
/// is active on `/admin/rooms/12` but not on `/admin/rooms-archive`.
/// Trailing slashes are ignored.
pub fn is_active(route: &str, current_path: &str) -> bool {
    let route = route.trim_end_matches('/');
    let current = current_path.trim_end_matches('/');

    if route.is_empty() {
        return current.is_empty();
    }

    current
        .strip_prefix(route)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// The active entry for the current path; the most specific route wins.
pub fn active_entry<'a>(entries: &'a [MenuEntry], current_path: &str) -> Option<&'a MenuEntry> {
    entries
        .iter()
        .filter(|entry| is_active(&entry.route, current_path))
        .max_by_key(|entry| entry.route.trim_end_matches('/').len())
}
