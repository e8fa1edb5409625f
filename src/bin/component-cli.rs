use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use loko_extensions::client::{ClientError, ComponentClient};

#[derive(Parser)]
#[command(name = "component-cli")]
#[command(about = "Invoke component endpoints of a running service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Post a JSON value with args
    Invoke {
        /// Endpoint path, e.g. /echo
        path: String,
        /// Value as JSON
        #[arg(long, default_value = "null")]
        value: String,
        /// Args as a JSON object
        #[arg(long)]
        args: Option<String>,
    },
    /// Upload a file with args
    Upload {
        /// Endpoint path, e.g. /files
        path: String,
        /// File to upload
        #[arg(long)]
        file: PathBuf,
        /// Args as a JSON object
        #[arg(long)]
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ComponentClient::new(&cli.url);

    let result = match cli.command {
        Commands::Health => client.health().await,
        Commands::Invoke { path, value, args } => {
            let value: Value = serde_json::from_str(&value)?;
            client.invoke(&path, value, parse_args(args.as_deref())?).await
        }
        Commands::Upload { path, file, args } => {
            let contents = tokio::fs::read(&file).await?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string();
            client
                .upload(&path, &filename, contents, parse_args(args.as_deref())?)
                .await
        }
    };

    match result {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(ClientError::Status { status, body }) => {
            eprintln!("Error: service returned status {}", status);
            eprintln!("Response: {}", body);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn parse_args(raw: Option<&str>) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    match raw {
        None => Ok(Map::new()),
        Some(text) => match serde_json::from_str(text)? {
            Value::Object(map) => Ok(map),
            _ => Err("--args must be a JSON object".into()),
        },
    }
}
