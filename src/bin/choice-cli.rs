use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "choice-cli")]
#[command(about = "Command-line client for the RFM choice service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Show a customer's segment and available options
    Customer { id: i64 },
    /// Record a customer's selected option
    Choose { id: i64, option: String },
    /// Show a customer's latest recorded choice
    Latest { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Customer { id } => client.get(format!("{}/customer/{}", base, id)).send().await?,
        Commands::Choose { id, option } => {
            client
                .post(format!("{}/choice", base))
                .json(&json!({ "customer_id": id, "selected_option": option }))
                .send()
                .await?
        }
        Commands::Latest { id } => {
            client.get(format!("{}/choice/latest/{}", base, id)).send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
