//! Bookstall CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema and the session table
//! bs-cli migrate
//!
//! # Create a user who can log in to the dashboard
//! bs-cli user create -e seller@example.com -n "Sam Seller" -p 'a long password'
//!
//! # Give that user some demo books and products
//! bs-cli seed --owner seller@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bs-cli")]
#[command(author, version, about = "Bookstall CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (storefront schema and session store)
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Insert demo books and products for a user
    Seed {
        /// Email of the user who will own the demo records
        #[arg(long)]
        owner: String,

        /// Number of books and products to create
        #[arg(long, default_value_t = 13)]
        count: u32,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bs_cli=info,bookstall_storefront=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                password,
            } => {
                let id = commands::user::create(&email, &name, &password).await?;
                tracing::info!(user_id = %id, "user created");
                Ok(())
            }
        },
        Commands::Seed { owner, count } => commands::seed::run(&owner, count).await,
    }
}
