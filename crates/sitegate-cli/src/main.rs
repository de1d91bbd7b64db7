//! sitegate - command-line front end for the business website API.
//!
//! Every landing-page and admin-panel operation is reachable as a
//! subcommand. Results are printed as pretty JSON on stdout; failures print
//! the backend's message on stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitegate_core::{admin, landing};
use sitegate_core::config::CredentialBackend;
use sitegate_core::forms::{ClientForm, EditTarget, ImageUpload, ProjectForm};
use sitegate_core::models::ContactSubmission;
use sitegate_core::{ApiClient, Config};

#[derive(Parser)]
#[command(name = "sitegate", version, about = "Talk to the business website backend")]
struct Cli {
    /// Backend base URL, e.g. https://example.com/api (overrides env and config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Neither read nor persist the admin token
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects
    Projects,
    /// Show or manage a single project
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// List clients
    Clients,
    /// Show or manage a single client
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },
    /// Submit the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        city: String,
    },
    /// Subscribe an email address to the newsletter
    Subscribe { email: String },
    /// Log in as admin and keep the token
    Login {
        #[arg(long)]
        username: Option<String>,
    },
    /// Forget the admin token
    Logout,
    /// Check the held admin token
    Verify,
    /// List contact form submissions (admin)
    Contacts,
    /// List newsletter subscribers (admin)
    Subscribers,
    /// Load everything the admin panel shows
    Dashboard,
}

#[derive(Subcommand)]
enum ProjectAction {
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Update the given fields; omitted fields (and the image) are kept
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum ClientAction {
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        designation: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Update the given fields; omitted fields (and the image) are kept
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        designation: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    if cli.ephemeral {
        config.credential_backend = CredentialBackend::Memory;
    }

    let base_url = match cli.base_url {
        Some(url) => config.base_url_with(Some(url)),
        None => config.base_url(),
    };
    info!(base_url = %base_url, "Using backend");

    let session = config.restore_session()?;
    let mut api = ApiClient::new(base_url, session)?;

    match cli.command {
        Command::Projects => print_json(&api.list_projects().await?),
        Command::Project { action } => run_project(&api, action).await,
        Command::Clients => print_json(&api.list_clients().await?),
        Command::Client { action } => run_client(&api, action).await,
        Command::Contact {
            name,
            email,
            mobile,
            city,
        } => {
            let submission = ContactSubmission {
                full_name: name,
                email,
                mobile_number: mobile,
                city,
            };
            print_json(&landing::send_contact(&api, &submission).await?)
        }
        Command::Subscribe { email } => print_json(&landing::subscribe(&api, &email).await?),
        Command::Login { username } => login(&mut api, &mut config, username).await,
        Command::Logout => {
            admin::sign_out(&mut api);
            eprintln!("Logged out");
            Ok(())
        }
        Command::Verify => print_json(&api.verify().await?),
        Command::Contacts => print_json(&api.list_contacts().await?),
        Command::Subscribers => print_json(&api.list_subscribers().await?),
        Command::Dashboard => print_json(&admin::load_dashboard(&api).await?),
    }
}

async fn login(api: &mut ApiClient, config: &mut Config, username: Option<String>) -> Result<()> {
    let username = match username.or_else(|| config.last_username.clone()) {
        Some(name) => name,
        None => prompt_username()?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    let response = admin::sign_in(api, &username, &password).await?;

    config.last_username = Some(username.trim().to_string());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    eprintln!(
        "Logged in as {}",
        response.username.as_deref().unwrap_or(username.trim())
    );
    Ok(())
}

fn prompt_username() -> Result<String> {
    print!("Username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    Ok(username.trim().to_string())
}

fn load_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>> {
    path.map(|p| ImageUpload::from_path(&p))
        .transpose()
        .context("Failed to load image")
}

async fn run_project(api: &ApiClient, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::Show { id } => print_json(&api.get_project(&id).await?),
        ProjectAction::Create {
            name,
            description,
            image,
        } => {
            let form = ProjectForm {
                name: Some(name),
                description: Some(description),
                image: load_image(image)?,
            };
            print_json(&admin::save_project(api, &EditTarget::Create, &form).await?)
        }
        ProjectAction::Update {
            id,
            name,
            description,
            image,
        } => {
            let form = ProjectForm {
                name,
                description,
                image: load_image(image)?,
            };
            print_json(&admin::save_project(api, &EditTarget::Edit(id), &form).await?)
        }
        ProjectAction::Delete { id } => print_json(&api.delete_project(&id).await?),
    }
}

async fn run_client(api: &ApiClient, action: ClientAction) -> Result<()> {
    match action {
        ClientAction::Show { id } => print_json(&api.get_client(&id).await?),
        ClientAction::Create {
            name,
            description,
            designation,
            image,
        } => {
            let form = ClientForm {
                name: Some(name),
                description: Some(description),
                designation: Some(designation),
                image: load_image(image)?,
            };
            print_json(&admin::save_client(api, &EditTarget::Create, &form).await?)
        }
        ClientAction::Update {
            id,
            name,
            description,
            designation,
            image,
        } => {
            let form = ClientForm {
                name,
                description,
                designation,
                image: load_image(image)?,
            };
            print_json(&admin::save_client(api, &EditTarget::Edit(id), &form).await?)
        }
        ClientAction::Delete { id } => print_json(&api.delete_client(&id).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
