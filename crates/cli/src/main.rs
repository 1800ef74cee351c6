//! Dynaq CLI - manage dynamic queue assignments

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9640";

#[derive(Parser)]
#[command(name = "dynaq")]
#[command(about = "Dynaq dynamic queue assignment CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "DYNAQ_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every assignment with its current expansion
    List,

    /// Set the assignment for a key
    Set {
        /// Assignment key (worker group or host name)
        key: String,

        /// Comma-separated expressions, e.g. "paid_*/10, free_*, !free_slow"
        expressions: String,
    },

    /// Delete the assignment for a key
    Unset {
        /// Assignment key
        key: String,
    },

    /// Resolve expressions to the exact queue list a worker would poll
    Resolve {
        /// Comma-separated expressions
        expressions: String,
    },

    /// Resolve expressions and collapse repeats (name/count)
    Expand {
        /// Comma-separated expressions
        expressions: String,
    },

    /// Register a queue name so globs can match it
    Register {
        /// Queue name
        name: String,
    },

    /// List known queues
    Queues,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct AssignmentRow {
    name: String,
    value: String,
    expanded: String,
}

#[derive(Deserialize)]
struct OverviewResult {
    rows: Vec<AssignmentRow>,
}

#[derive(Deserialize)]
struct QueuesResult {
    queues: Vec<String>,
}

/// Same splitting rules as the daemon: commas separate, whitespace is dropped
fn split_expressions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|t| !t.is_empty())
        .collect()
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_queues(title: &str, queues: &[String]) {
    println!("{}", title.cyan().bold());
    if queues.is_empty() {
        println!("  {}", "(nothing to poll)".yellow());
    }
    for queue in queues {
        println!("  {}", queue);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let result = call_rpc(&cli.rpc_url, "assignments.overview.v1", json!({})).await?;
            let overview: OverviewResult = serde_json::from_value(result)?;

            println!("{}", "Dynamic queue assignments".cyan().bold());
            println!();
            println!("{}", Table::new(overview.rows));
        }

        Commands::Set { key, expressions } => {
            let values = split_expressions(&expressions);
            if values.is_empty() {
                anyhow::bail!("No expressions given (use `dynaq unset {}` to delete)", key);
            }

            let params = json!({ "key": key, "values": values });
            call_rpc(&cli.rpc_url, "assignments.set.v1", params).await?;

            println!("{}", format!("✓ Assignment {} updated", key).green().bold());
        }

        Commands::Unset { key } => {
            let params = json!({ "key": key, "values": [] });
            call_rpc(&cli.rpc_url, "assignments.set.v1", params).await?;

            println!("{}", format!("✓ Assignment {} deleted", key).green().bold());
        }

        Commands::Resolve { expressions } => {
            let params = json!({ "expressions": split_expressions(&expressions) });
            let result = call_rpc(&cli.rpc_url, "queues.resolve.v1", params).await?;
            let resolved: QueuesResult = serde_json::from_value(result)?;

            print_queues("Resolved queues (poll order weight)", &resolved.queues);
        }

        Commands::Expand { expressions } => {
            let params = json!({ "expressions": split_expressions(&expressions) });
            let result = call_rpc(&cli.rpc_url, "queues.expand.v1", params).await?;
            let expanded: QueuesResult = serde_json::from_value(result)?;

            print_queues("Expanded queues", &expanded.queues);
        }

        Commands::Register { name } => {
            let params = json!({ "name": name });
            call_rpc(&cli.rpc_url, "queues.register.v1", params).await?;

            println!("{}", format!("✓ Queue {} registered", name).green().bold());
        }

        Commands::Queues => {
            let result = call_rpc(&cli.rpc_url, "queues.list.v1", json!({})).await?;
            let known: QueuesResult = serde_json::from_value(result)?;

            print_queues("Known queues", &known.queues);
        }
    }

    Ok(())
}
