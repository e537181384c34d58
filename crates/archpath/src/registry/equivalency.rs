//! Collapses interchangeable components into the service group they are scored as.
//!
//! The group id is always one of its own members, so normalizing twice is a no-op.

/// Canonical group id followed by every member, canonical first.
static SERVICE_GROUPS: &[(&str, &[&str])] = &[
    ("web-server", &["web-server", "app-server"]),
    ("database", &["database"]),
    ("cache", &["cache"]),
    ("search-engine", &["search-engine"]),
    ("file-storage", &["file-storage", "object-storage"]),
    ("cdn", &["cdn"]),
    ("load-balancer", &["load-balancer"]),
    ("api-gateway", &["api-gateway"]),
    ("dns", &["dns"]),
    ("message-queue", &["message-queue", "event-streaming"]),
    ("websockets", &["websockets"]),
    ("monitoring", &["monitoring", "logging"]),
    ("analytics", &["analytics"]),
    ("auth-service", &["auth-service"]),
    ("firewall", &["firewall", "encryption"]),
    ("lambda", &["lambda"]),
];

/// Map a component id to its service group.
///
/// Ids missing from the table act as their own singleton group so a newly
/// registered component can never break scoring.
pub fn normalize(component_id: &str) -> &str {
    SERVICE_GROUPS
        .iter()
        .find(|(_, members)| members.iter().any(|member| *member == component_id))
        .map(|(group, _)| *group)
        .unwrap_or(component_id)
}

/// Members of the group `group_id` belongs to, canonical first.
pub fn group_members(group_id: &str) -> &'static [&'static str] {
    let canonical = normalize(group_id);
    SERVICE_GROUPS
        .iter()
        .find(|(group, _)| *group == canonical)
        .map(|(_, members)| *members)
        .unwrap_or(&[])
}

/// Normalize a list, keeping the first occurrence of each group.
pub(crate) fn normalize_all<'a, I>(ids: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: Vec<&'a str> = Vec::new();
    for id in ids {
        let group = normalize(id);
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}
