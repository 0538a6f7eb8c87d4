//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the graphapi binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::abstractions::{CollectionQueryParameters, CountQueryParameters, ItemQueryParameters};
use crate::entities::{EntityKind, Parent};

/// Microsoft Graph command-line interface.
#[derive(Parser, Debug)]
#[command(name = "graphapi", about = "Microsoft Graph CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID (or user principal name for users).
        id: String,

        #[command(flatten)]
        parent: ParentArgs,

        /// Properties to return (comma-separated).
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
    },

    /// List entities with OData query options.
    List {
        /// The type of entity to list.
        entity: Entity,

        #[command(flatten)]
        parent: ParentArgs,

        #[command(flatten)]
        query: ListArgs,
    },

    /// Count entities with `$count`.
    Count {
        /// The type of entity to count.
        entity: Entity,

        #[command(flatten)]
        parent: ParentArgs,

        /// OData filter expression.
        #[arg(long)]
        filter: Option<String>,

        /// Search expression, e.g. "displayName:team".
        #[arg(long)]
        search: Option<String>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The entity ID.
        id: String,

        #[command(flatten)]
        parent: ParentArgs,
    },
}

/// Owner of an event.
#[derive(Args, Debug, Clone, Default)]
pub struct ParentArgs {
    /// Group that owns the event calendar.
    #[arg(long, conflicts_with = "user")]
    pub group: Option<String>,

    /// User that owns the event calendar.
    #[arg(long)]
    pub user: Option<String>,
}

impl From<ParentArgs> for Parent {
    fn from(args: ParentArgs) -> Self {
        Parent {
            group: args.group,
            user: args.user,
        }
    }
}

/// OData query options for `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Maximum number of items to return.
    #[arg(long)]
    pub top: Option<i32>,

    /// Number of items to skip.
    #[arg(long)]
    pub skip: Option<i32>,

    /// OData filter expression.
    #[arg(long)]
    pub filter: Option<String>,

    /// Properties to return (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Sort order, e.g. "displayName desc" (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub orderby: Vec<String>,

    /// Search expression, e.g. "displayName:team".
    #[arg(long)]
    pub search: Option<String>,

    /// Ask the service to include the total count.
    #[arg(long)]
    pub count: bool,
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

impl From<ListArgs> for CollectionQueryParameters {
    fn from(args: ListArgs) -> Self {
        CollectionQueryParameters {
            count: args.count.then_some(true),
            filter: args.filter,
            orderby: non_empty(args.orderby),
            search: args.search,
            select: non_empty(args.select),
            skip: args.skip,
            top: args.top,
            ..Default::default()
        }
    }
}

/// Build item query options from `--select`.
pub fn item_query(select: Vec<String>) -> ItemQueryParameters {
    ItemQueryParameters {
        select: non_empty(select),
        ..Default::default()
    }
}

/// Build `$count` query options.
pub fn count_query(filter: Option<String>, search: Option<String>) -> CountQueryParameters {
    CountQueryParameters { filter, search }
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A Microsoft 365 or security group.
    #[value(alias = "groups")]
    Group,
    /// A user account.
    #[value(alias = "users")]
    User,
    /// A OneDrive or document library.
    #[value(alias = "drives")]
    Drive,
    /// A calendar event (requires --group or --user).
    #[value(alias = "events")]
    Event,
}

impl From<Entity> for EntityKind {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Group => EntityKind::Group,
            Entity::User => EntityKind::User,
            Entity::Drive => EntityKind::Drive,
            Entity::Event => EntityKind::Event,
        }
    }
}
