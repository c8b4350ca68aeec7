use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "posts-cli")]
#[command(about = "Command-line client for the posts service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every stored post
    List,
    /// Create a post with the given body
    Create { body: String },
    /// Fetch one post
    Get { id: i64 },
    /// Delete one post
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/posts", base)).send().await?,
        Commands::Create { body } => {
            client
                .post(format!("{}/posts", base))
                .json(&json!({ "Body": body }))
                .send()
                .await?
        }
        Commands::Get { id } => client.get(format!("{}/posts/{}", base, id)).send().await?,
        Commands::Delete { id } => {
            client
                .delete(format!("{}/posts/{}", base, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: posts service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text.trim_end());
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
