use clap::{Parser, Subcommand};
use reqwest::header::COOKIE;
use serde_json::Value;

use openboard::mode::{ModeProvider, ModeSwitch};
use openboard::waitlist::WaitlistSubmission;
use openboard::DataMode;

#[derive(Parser)]
#[command(name = "openboard-cli")]
#[command(about = "Client for the OpenBoard data layer", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Send this mode as the `ob_datamode` override.
    #[arg(short, long)]
    mode: Option<DataMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the data mode override
    Mode {
        #[command(subcommand)]
        action: ModeAction,
    },
    /// List projects
    Projects,
    /// Show the current profile
    Profile,
    /// Join the waitlist
    Waitlist {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        about: Option<String>,
    },
    /// Server version and configuration summary
    Status,
}

#[derive(Subcommand)]
enum ModeAction {
    /// Effective mode as the server sees this client
    Get,
    /// Ask the server to set the override
    Set { mode: DataMode },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/').to_string();

    let switch = ModeSwitch::new(client.clone(), &base, DataMode::Mock);
    if let Some(mode) = cli.mode {
        switch.set_override(mode);
    }

    let request = match cli.command {
        Commands::Mode {
            action: ModeAction::Set { mode },
        } => {
            let mode = switch.switch(mode).await?;
            println!("data mode set to {} (cookie {})", mode, switch.cookie_header().unwrap_or_default());
            return Ok(());
        }
        Commands::Mode { action: ModeAction::Get } => client.get(format!("{}/api/datamode", base)),
        Commands::Projects => client.get(format!("{}/api/projects", base)),
        Commands::Profile => client.get(format!("{}/api/profile", base)),
        Commands::Waitlist {
            name,
            email,
            role,
            about,
        } => {
            let mut submission = WaitlistSubmission::new(name, email);
            submission.role = role;
            submission.about = about;
            client.post(format!("{}/api/waitlist", base)).json(&submission)
        }
        Commands::Status => client.get(format!("{}/api/status", base)),
    };

    let request = match switch.override_mode() {
        Some(_) => request.header(COOKIE, switch.cookie_header().unwrap_or_default()),
        None => request,
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
