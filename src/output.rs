//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::entities::Entity;
use crate::models::{DateTimeTimeZone, Drive, Event, Group, User};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(kind: &str, id: Option<&str>) -> Vec<String> {
    let id = id.unwrap_or("-");
    let title = format!("{kind}: {id}");
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        lines.push(format!("{:<16}{}", format!("{label}:"), value));
    }
}

fn format_zoned(dt: &DateTimeTimeZone) -> String {
    match &dt.time_zone {
        Some(tz) => format!("{} ({tz})", dt.date_time),
        None => dt.date_time.clone(),
    }
}

impl PrettyPrint for Group {
    fn pretty_print(&self) -> String {
        let mut lines = header("Group", self.id.as_deref());
        push_field(&mut lines, "Name", self.display_name.as_deref());
        push_field(&mut lines, "Description", self.description.as_deref());
        push_field(&mut lines, "Mail", self.mail.as_deref());
        push_field(&mut lines, "Visibility", self.visibility.as_deref());
        if let Some(types) = &self.group_types {
            if !types.is_empty() {
                push_field(&mut lines, "Types", Some(types.join(", ").as_str()));
            }
        }
        if let Some(created) = &self.created_date_time {
            push_field(
                &mut lines,
                "Created",
                Some(created.format("%Y-%m-%d %H:%M:%S UTC").to_string().as_str()),
            );
        }
        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let mut lines = header("User", self.id.as_deref());
        push_field(&mut lines, "Name", self.display_name.as_deref());
        push_field(&mut lines, "UPN", self.user_principal_name.as_deref());
        push_field(&mut lines, "Mail", self.mail.as_deref());
        push_field(&mut lines, "Job Title", self.job_title.as_deref());
        push_field(&mut lines, "Department", self.department.as_deref());
        if let Some(enabled) = self.account_enabled {
            push_field(&mut lines, "Enabled", Some(if enabled { "yes" } else { "no" }));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Drive {
    fn pretty_print(&self) -> String {
        let mut lines = header("Drive", self.id.as_deref());
        push_field(&mut lines, "Name", self.name.as_deref());
        push_field(&mut lines, "Type", self.drive_type.as_deref());
        push_field(&mut lines, "URL", self.web_url.as_deref());
        if let Some(quota) = &self.quota {
            if let (Some(used), Some(total)) = (quota.used, quota.total) {
                push_field(&mut lines, "Quota", Some(format!("{used} / {total} bytes").as_str()));
            }
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Event {
    fn pretty_print(&self) -> String {
        let mut lines = header("Event", self.id.as_deref());
        push_field(&mut lines, "Subject", self.subject.as_deref());
        push_field(&mut lines, "Start", self.start.as_ref().map(format_zoned).as_deref());
        push_field(&mut lines, "End", self.end.as_ref().map(format_zoned).as_deref());
        push_field(
            &mut lines,
            "Location",
            self.location.as_ref().and_then(|l| l.display_name.as_deref()),
        );
        if self.is_cancelled == Some(true) {
            lines.push("Status:         cancelled".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Entity {
    fn pretty_print(&self) -> String {
        match self {
            Entity::Group(g) => g.pretty_print(),
            Entity::User(u) => u.pretty_print(),
            Entity::Drive(d) => d.pretty_print(),
            Entity::Event(e) => e.pretty_print(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_pretty_print() {
        let group = Group {
            id: Some("g1".to_string()),
            display_name: Some("Engineering".to_string()),
            group_types: Some(vec!["Unified".to_string()]),
            ..Default::default()
        };
        let out = group.pretty_print();
        assert!(out.starts_with("Group: g1\n"));
        assert!(out.contains("Name:           Engineering"));
        assert!(out.contains("Types:          Unified"));
        assert!(!out.contains("Mail:"));
    }

    #[test]
    fn test_event_pretty_print() {
        let event = Event {
            id: Some("e1".to_string()),
            subject: Some("Planning".to_string()),
            start: Some(DateTimeTimeZone {
                date_time: "2024-04-01T09:00:00".to_string(),
                time_zone: Some("UTC".to_string()),
            }),
            is_cancelled: Some(true),
            ..Default::default()
        };
        let out = Entity::Event(event).pretty_print();
        assert!(out.contains("Start:          2024-04-01T09:00:00 (UTC)"));
        assert!(out.contains("cancelled"));
    }
}
