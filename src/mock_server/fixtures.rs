//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::NaiveDate;

use crate::models::{DateTimeTimeZone, Event, ItemBody, Location, GROUP_ODATA_TYPE, USER_ODATA_TYPE};
use crate::{Group, User};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Group Fixtures
    // =========================================================================

    /// Create a minimal group with an id and display name.
    pub fn minimal_group(id: &str, name: &str) -> Group {
        Group {
            odata_type: Some(GROUP_ODATA_TYPE.to_string()),
            id: Some(id.to_string()),
            display_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Create a Microsoft 365 group with a mailbox.
    pub fn unified_group(id: &str, name: &str, nickname: &str) -> Group {
        Group {
            mail: Some(format!("{nickname}@contoso.com")),
            mail_nickname: Some(nickname.to_string()),
            mail_enabled: Some(true),
            security_enabled: Some(false),
            visibility: Some("Private".to_string()),
            group_types: Some(vec!["Unified".to_string()]),
            ..Self::minimal_group(id, name)
        }
    }

    /// Create a security group.
    pub fn security_group(id: &str, name: &str) -> Group {
        Group {
            mail_enabled: Some(false),
            security_enabled: Some(true),
            group_types: Some(vec![]),
            ..Self::minimal_group(id, name)
        }
    }

    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create a user from a display name and mail nickname.
    pub fn user(id: &str, name: &str, nickname: &str) -> User {
        let upn = format!("{nickname}@contoso.com");
        User {
            odata_type: Some(USER_ODATA_TYPE.to_string()),
            id: Some(id.to_string()),
            display_name: Some(name.to_string()),
            user_principal_name: Some(upn.clone()),
            mail: Some(upn),
            account_enabled: Some(true),
            ..Default::default()
        }
    }

    // =========================================================================
    // Event Fixtures
    // =========================================================================

    /// Create a one-hour event starting at the given UTC hour on 2024-04-01.
    ///
    /// Hours past 22 leave `start` or `end` unset.
    pub fn event(id: &str, subject: &str, hour: u32) -> Event {
        let at = |h: u32| {
            NaiveDate::from_ymd_opt(2024, 4, 1)
                .and_then(|day| day.and_hms_opt(h, 0, 0))
                .map(|dt| DateTimeTimeZone::new(dt, "UTC"))
        };
        Event {
            id: Some(id.to_string()),
            subject: Some(subject.to_string()),
            body: Some(ItemBody::text(format!("Agenda for {subject}"))),
            start: at(hour),
            end: at(hour + 1),
            location: Some(Location {
                display_name: Some("Conf Room 1".to_string()),
                ..Default::default()
            }),
            is_all_day: Some(false),
            is_cancelled: Some(false),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create the default test scenario.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            groups: vec![
                Self::unified_group("g-engineering", "Engineering", "engineering"),
                Self::unified_group("g-marketing", "Marketing", "marketing"),
                Self::security_group("g-admins", "Tenant Admins"),
            ],
            users: vec![
                Self::user("u-adele", "Adele Vance", "adelev"),
                Self::user("u-alex", "Alex Wilber", "alexw"),
            ],
            group_events: vec![
                ("g-engineering".to_string(), Self::event("e-standup", "Daily Standup", 9)),
                ("g-engineering".to_string(), Self::event("e-planning", "Sprint Planning", 13)),
            ],
            user_events: vec![("u-adele".to_string(), Self::event("e-review", "Design Review", 15))],
        }
    }
}

/// Default test scenario with related data.
pub struct DefaultScenario {
    pub groups: Vec<Group>,
    pub users: Vec<User>,
    /// Events keyed by owning group id.
    pub group_events: Vec<(String, Event)>,
    /// Events keyed by owning user id.
    pub user_events: Vec<(String, Event)>,
}
