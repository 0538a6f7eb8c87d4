//! Basic example demonstrating the Microsoft Graph request builders.
//!
//! Run with:
//! ```
//! GRAPH_ACCESS_TOKEN=your-token cargo run --example basic
//! ```

use graphapi::{
    CollectionQueryParameters, CountQueryParameters, GraphServiceClient, ItemQueryParameters,
    RequestConfiguration,
};

#[tokio::main]
async fn main() -> graphapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Graph client...");
    let client = GraphServiceClient::from_env()?;

    // Who am I?
    println!("\n--- Signed-in User ---");
    let config = RequestConfiguration::with_query(ItemQueryParameters {
        select: Some(vec!["displayName".into(), "userPrincipalName".into()]),
        ..Default::default()
    });
    if let Some(me) = client.me().get(Some(&config)).await? {
        println!(
            "{} <{}>",
            me.display_name.as_deref().unwrap_or("unknown"),
            me.user_principal_name.as_deref().unwrap_or("-")
        );
    }

    // List the first page of Microsoft 365 groups
    println!("\n--- Listing Groups (first page) ---");
    let config = RequestConfiguration::with_query(CollectionQueryParameters {
        top: Some(10),
        filter: Some("groupTypes/any(c:c eq 'Unified')".into()),
        select: Some(vec!["id".into(), "displayName".into(), "mail".into()]),
        ..Default::default()
    });
    let groups = client.groups().get(Some(&config)).await?.unwrap_or_default();
    println!(
        "Found {} groups{}",
        groups.len(),
        if groups.has_more() { " (more available)" } else { "" }
    );
    for group in &groups.value {
        println!(
            "  - {} ({})",
            group.display_name.as_deref().unwrap_or("-"),
            group.id.as_deref().unwrap_or("-")
        );
    }

    // Drill into the first group
    if let Some(group_id) = groups.value.first().and_then(|g| g.id.clone()) {
        let group = client.groups().by_group_id(group_id);

        println!("\n--- Group Calendar ---");
        let events = group.events().get(None).await?.unwrap_or_default();
        for event in events.value.iter().take(5) {
            let start = event.start.as_ref().map(|s| s.date_time.as_str());
            println!(
                "  {} at {}",
                event.subject.as_deref().unwrap_or("(no subject)"),
                start.unwrap_or("?")
            );
        }

        // $count on directory objects needs ConsistencyLevel: eventual
        let config = RequestConfiguration::with_query(CountQueryParameters::default())
            .header("ConsistencyLevel", "eventual")?;
        let members = group.members().count().get(Some(&config)).await?;
        println!("\nMembers: {}", members.unwrap_or_default());

        println!("\n--- Members ---");
        let members = group.members().get(None).await?.unwrap_or_default();
        for member in &members.value {
            println!(
                "  - {} [{}]",
                member.display_name().unwrap_or("-"),
                member.odata_type().unwrap_or("directoryObject")
            );
        }
    }

    // Reports come back as a CSV stream
    println!("\n--- Email Activity (D7) ---");
    let report = client
        .reports()
        .get_email_activity_counts_with_period("D7")
        .get(None)
        .await?
        .unwrap_or_default();
    println!("Report is {} bytes", report.len());

    Ok(())
}
