//! Entity-level operations shared by the CLI and the MCP server.
//!
//! Maps an [`EntityKind`] plus optional parent ids onto the matching request
//! builder so callers can work with "get a group" or "list a user's events"
//! without naming builder types.

use serde::{Deserialize, Serialize};

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters, RequestConfiguration,
};
use crate::client::GraphServiceClient;
use crate::error::{GraphError, Result};
use crate::models::{CollectionResponse, Drive, Event, Group, User};

/// Entity types reachable through the shared operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Group,
    User,
    Drive,
    Event,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Group => "group",
            EntityKind::User => "user",
            EntityKind::Drive => "drive",
            EntityKind::Event => "event",
        }
    }
}

/// Owner of a nested collection. Only events have one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parent {
    pub group: Option<String>,
    pub user: Option<String>,
}

enum EventOwner<'a> {
    Group(&'a str),
    User(&'a str),
}

impl Parent {
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            group: Some(id.into()),
            user: None,
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self {
            group: None,
            user: Some(id.into()),
        }
    }

    fn event_owner(&self) -> Result<EventOwner<'_>> {
        match (&self.group, &self.user) {
            (Some(group), None) => Ok(EventOwner::Group(group)),
            (None, Some(user)) => Ok(EventOwner::User(user)),
            (Some(_), Some(_)) => Err(GraphError::InvalidRequest(
                "events belong to either a group or a user, not both".to_string(),
            )),
            (None, None) => Err(GraphError::InvalidRequest(
                "a group or user id is required for events".to_string(),
            )),
        }
    }
}

/// A single entity of any supported kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Group(Group),
    User(User),
    Drive(Drive),
    Event(Event),
}

/// One page of entities of a single kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityPage {
    Groups(CollectionResponse<Group>),
    Users(CollectionResponse<User>),
    Drives(CollectionResponse<Drive>),
    Events(CollectionResponse<Event>),
}

impl EntityPage {
    pub fn len(&self) -> usize {
        match self {
            EntityPage::Groups(p) => p.len(),
            EntityPage::Users(p) => p.len(),
            EntityPage::Drives(p) => p.len(),
            EntityPage::Events(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next_link(&self) -> Option<&str> {
        match self {
            EntityPage::Groups(p) => p.next_link.as_deref(),
            EntityPage::Users(p) => p.next_link.as_deref(),
            EntityPage::Drives(p) => p.next_link.as_deref(),
            EntityPage::Events(p) => p.next_link.as_deref(),
        }
    }

    pub fn count(&self) -> Option<i64> {
        match self {
            EntityPage::Groups(p) => p.count,
            EntityPage::Users(p) => p.count,
            EntityPage::Drives(p) => p.count,
            EntityPage::Events(p) => p.count,
        }
    }
}

/// Fetch one entity. `Ok(None)` means the service answered with no body.
#[tracing::instrument(skip(client, query))]
pub async fn get_entity(
    client: &GraphServiceClient,
    kind: EntityKind,
    id: &str,
    parent: &Parent,
    query: ItemQueryParameters,
) -> Result<Option<Entity>> {
    let config = RequestConfiguration::with_query(query);
    let config = Some(&config);
    let entity = match kind {
        EntityKind::Group => client
            .groups()
            .by_group_id(id)
            .get(config)
            .await?
            .map(Entity::Group),
        EntityKind::User => client
            .users()
            .by_user_id(id)
            .get(config)
            .await?
            .map(Entity::User),
        EntityKind::Drive => client
            .drives()
            .by_drive_id(id)
            .get(config)
            .await?
            .map(Entity::Drive),
        EntityKind::Event => match parent.event_owner()? {
            EventOwner::Group(group) => client
                .groups()
                .by_group_id(group)
                .events()
                .by_event_id(id)
                .get(config)
                .await?
                .map(Entity::Event),
            EventOwner::User(user) => client
                .users()
                .by_user_id(user)
                .events()
                .by_event_id(id)
                .get(config)
                .await?
                .map(Entity::Event),
        },
    };
    Ok(entity)
}

/// List one page of entities.
#[tracing::instrument(skip(client, query))]
pub async fn list_entities(
    client: &GraphServiceClient,
    kind: EntityKind,
    parent: &Parent,
    query: CollectionQueryParameters,
) -> Result<EntityPage> {
    let config = RequestConfiguration::with_query(query);
    let config = Some(&config);
    let page = match kind {
        EntityKind::Group => {
            EntityPage::Groups(client.groups().get(config).await?.unwrap_or_default())
        }
        EntityKind::User => {
            EntityPage::Users(client.users().get(config).await?.unwrap_or_default())
        }
        EntityKind::Drive => {
            EntityPage::Drives(client.drives().get(config).await?.unwrap_or_default())
        }
        EntityKind::Event => {
            let events = match parent.event_owner()? {
                EventOwner::Group(group) => {
                    client.groups().by_group_id(group).events().get(config).await?
                }
                EventOwner::User(user) => {
                    client.users().by_user_id(user).events().get(config).await?
                }
            };
            EntityPage::Events(events.unwrap_or_default())
        }
    };
    Ok(page)
}

/// Count entities with the `$count` endpoint.
#[tracing::instrument(skip(client, query))]
pub async fn count_entities(
    client: &GraphServiceClient,
    kind: EntityKind,
    parent: &Parent,
    query: CountQueryParameters,
) -> Result<i32> {
    // $count with $filter or $search is an advanced query and needs this header
    let config = RequestConfiguration::with_query(query).header("ConsistencyLevel", "eventual")?;
    let config = Some(&config);
    let count = match kind {
        EntityKind::Group => client.groups().count().get(config).await?,
        EntityKind::User => client.users().count().get(config).await?,
        EntityKind::Drive => {
            return Err(GraphError::InvalidRequest(
                "drives do not support $count".to_string(),
            ))
        }
        EntityKind::Event => match parent.event_owner()? {
            EventOwner::Group(group) => {
                client.groups().by_group_id(group).events().count().get(config).await?
            }
            EventOwner::User(user) => {
                client.users().by_user_id(user).events().count().get(config).await?
            }
        },
    };
    Ok(count.unwrap_or_default())
}

/// Delete one entity.
#[tracing::instrument(skip(client))]
pub async fn delete_entity(
    client: &GraphServiceClient,
    kind: EntityKind,
    id: &str,
    parent: &Parent,
) -> Result<()> {
    match kind {
        EntityKind::Group => client.groups().by_group_id(id).delete(None).await,
        EntityKind::User => client.users().by_user_id(id).delete(None).await,
        EntityKind::Drive => client.drives().by_drive_id(id).delete(None).await,
        EntityKind::Event => match parent.event_owner()? {
            EventOwner::Group(group) => {
                client
                    .groups()
                    .by_group_id(group)
                    .events()
                    .by_event_id(id)
                    .delete(None)
                    .await
            }
            EventOwner::User(user) => {
                client
                    .users()
                    .by_user_id(user)
                    .events()
                    .by_event_id(id)
                    .delete(None)
                    .await
            }
        },
    }
}
