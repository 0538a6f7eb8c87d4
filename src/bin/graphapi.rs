//! Microsoft Graph CLI binary.
//!
//! A command-line interface for reading and deleting Graph entities.

use clap::Parser;
use graphapi::cli::{count_query, item_query, Cli, Command};
use graphapi::entities::{self, EntityPage, Parent};
use graphapi::output::PrettyPrint;
use graphapi::{CollectionResponse, Drive, Event, GraphServiceClient, Group, User};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match GraphServiceClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set GRAPH_ACCESS_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &GraphServiceClient, cli: Cli) -> graphapi::Result<()> {
    match cli.command {
        Command::Get {
            entity,
            id,
            parent,
            select,
        } => {
            let parent = Parent::from(parent);
            let found =
                entities::get_entity(client, entity.into(), &id, &parent, item_query(select))
                    .await?;
            match found {
                Some(entity) if cli.json => println!("{}", serde_json::to_string_pretty(&entity)?),
                Some(entity) => println!("{}", entity.pretty_print()),
                None => eprintln!("No content returned for {id}"),
            }
        }
        Command::List {
            entity,
            parent,
            query,
        } => {
            let parent = Parent::from(parent);
            let page = entities::list_entities(client, entity.into(), &parent, query.into()).await?;
            output_page(&page, cli.json)?;
        }
        Command::Count {
            entity,
            parent,
            filter,
            search,
        } => {
            let parent = Parent::from(parent);
            let count = entities::count_entities(
                client,
                entity.into(),
                &parent,
                count_query(filter, search),
            )
            .await?;
            if cli.json {
                println!("{}", serde_json::json!({ "count": count }));
            } else {
                println!("{count}");
            }
        }
        Command::Delete { entity, id, parent } => {
            let parent = Parent::from(parent);
            entities::delete_entity(client, entity.into(), &id, &parent).await?;
            if !cli.json {
                println!("Deleted {id}");
            }
        }
    }
    Ok(())
}

fn output_page(page: &EntityPage, json: bool) -> graphapi::Result<()> {
    match page {
        EntityPage::Groups(p) => print_rows(p, json, |item| GroupRow::from(item)),
        EntityPage::Users(p) => print_rows(p, json, |item| UserRow::from(item)),
        EntityPage::Drives(p) => print_rows(p, json, |item| DriveRow::from(item)),
        EntityPage::Events(p) => print_rows(p, json, |item| EventRow::from(item)),
    }
}

fn print_rows<T, R, F>(page: &CollectionResponse<T>, json: bool, to_row: F) -> graphapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.value)?);
    } else {
        let rows: Vec<R> = page.value.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        match (page.count, page.has_more()) {
            (Some(total), _) => println!("\n{} of {} items", page.len(), total),
            (None, true) => println!("\n{} items (more available)", page.len()),
            (None, false) => println!("\n{} items", page.len()),
        }
    }
    Ok(())
}

// Table row types for non-JSON output

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Tabled)]
struct GroupRow {
    id: String,
    name: String,
    mail: String,
    #[tabled(rename = "type")]
    group_type: String,
}

impl From<&Group> for GroupRow {
    fn from(g: &Group) -> Self {
        Self {
            id: text(&g.id),
            name: text(&g.display_name),
            mail: text(&g.mail),
            group_type: if g.is_unified() {
                "microsoft365".to_string()
            } else if g.security_enabled == Some(true) {
                "security".to_string()
            } else {
                String::new()
            },
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    id: String,
    name: String,
    upn: String,
    title: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: text(&u.id),
            name: text(&u.display_name),
            upn: text(&u.user_principal_name),
            title: text(&u.job_title),
        }
    }
}

#[derive(Tabled)]
struct DriveRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    drive_type: String,
}

impl From<&Drive> for DriveRow {
    fn from(d: &Drive) -> Self {
        Self {
            id: text(&d.id),
            name: text(&d.name),
            drive_type: text(&d.drive_type),
        }
    }
}

#[derive(Tabled)]
struct EventRow {
    id: String,
    subject: String,
    start: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            id: text(&e.id),
            subject: text(&e.subject),
            start: e
                .start
                .as_ref()
                .map(|s| s.date_time.clone())
                .unwrap_or_default(),
        }
    }
}
