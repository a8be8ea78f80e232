// `court-backend remote ...`: read-only and registration calls against a
// running server, printed as pretty JSON.

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use serde::Serialize;

use backend_application::dtos::{DropInQuery, RelatedQuery};
use backend_infrastructure::EventApiClient;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Every event on the server
    List,
    /// Upcoming open events
    Featured,
    /// Newest events first
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// One event by id
    Get { id: String },
    /// Free-text search
    Search { text: String },
    /// Events sharing a category or level
    Related {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Drop-in sessions
    DropIn {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    Join { id: String },
    Leave { id: String },
}

pub async fn run_remote(base_url: &str, timeout: Duration, command: RemoteCommand) -> Result<String> {
    let client = EventApiClient::new(base_url, timeout)?;
    match command {
        RemoteCommand::List => render(&client.list().await?),
        RemoteCommand::Featured => render(&client.featured().await?),
        RemoteCommand::Recent { limit } => {
            let mut events = client.recent().await?;
            events.truncate(limit);
            render(&events)
        }
        RemoteCommand::Get { id } => match client.get(&id).await? {
            Some(event) => render(&event),
            None => Err(anyhow!("event {} not found", id)),
        },
        RemoteCommand::Search { text } => render(&client.search(&text).await?),
        RemoteCommand::Related {
            category,
            level,
            exclude,
        } => {
            let params = RelatedQuery {
                category,
                level,
                exclude,
            };
            render(&client.related(&params).await?)
        }
        RemoteCommand::DropIn { city, status, date } => {
            let params = DropInQuery { city, status, date };
            render(&client.drop_in(&params).await?)
        }
        RemoteCommand::Join { id } => render(&client.join(&id).await?),
        RemoteCommand::Leave { id } => render(&client.leave(&id).await?),
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
