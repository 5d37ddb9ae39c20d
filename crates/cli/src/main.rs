//! Clementine CLI - the form layer for the CRM core.
//!
//! # Usage
//!
//! ```bash
//! # Authenticate (admin goes through the hosted provider)
//! clem-cli login -e admin@crm.com -p <password>
//! clem-cli whoami
//! clem-cli logout
//!
//! # Admin roster workflows
//! clem-cli clients list
//! clem-cli clients create -n "Carlos Rodríguez" -e carlos@empresa.com -p secret123
//!
//! # Client catalog and sales workflows
//! clem-cli products create -n "Laptop Pro X500" -d "High-end laptop" --price 25999.99 --stock 15
//! clem-cli sales record --product <id> --quantity 2
//! clem-cli dashboard
//!
//! # Demo data
//! clem-cli seed --demo-password secret123
//! ```
//!
//! The session persists in the local store, so commands in separate
//! invocations share one login.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "clem-cli")]
#[command(author, version, about = "Clementine CRM command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as the admin or a client
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Install the demo dataset
    Seed {
        /// Also give every seeded client this password
        #[arg(long)]
        demo_password: Option<String>,
    },
    /// Manage client accounts (admin)
    Clients {
        #[command(subcommand)]
        action: ClientAction,
    },
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Record and inspect sales
    Sales {
        #[command(subcommand)]
        action: SaleAction,
    },
    /// Show role-appropriate dashboard metrics
    Dashboard,
}

#[derive(Subcommand)]
enum ClientAction {
    /// List all clients, most recent first
    List,
    /// Search clients by name, email, or company
    Search { query: String },
    /// Create a client account with its login credential
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address (unique, case-insensitive)
        #[arg(short, long)]
        email: String,

        /// Login password (stored as a salted hash)
        #[arg(short, long)]
        password: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Create the account as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Update a client record
    Update {
        /// Client id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        company: Option<String>,

        /// `active` or `inactive`
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a client account and its credential
    Delete {
        /// Client id
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List the catalog
    List {
        /// Catalog owner (admin only; clients use their own)
        #[arg(long)]
        owner: Option<String>,
    },
    /// Search the catalog by name or description
    Search {
        query: String,

        #[arg(long)]
        owner: Option<String>,
    },
    /// Add a product
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Unit price in MXN
        #[arg(long)]
        price: Decimal,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: u32,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        owner: Option<String>,
    },
    /// Update a product
    Update {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long)]
        stock: Option<u32>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        owner: Option<String>,
    },
    /// Remove a product (historic sales keep their totals)
    Delete {
        /// Product id
        id: String,

        #[arg(long)]
        owner: Option<String>,
    },
}

#[derive(Subcommand)]
enum SaleAction {
    /// Register a quick sale (decrements stock, appends to the ledger)
    Record {
        /// Product id
        #[arg(long)]
        product: String,

        /// Units sold
        #[arg(long)]
        quantity: u32,

        #[arg(long)]
        owner: Option<String>,
    },
    /// List the ledger, oldest first
    List {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Count, total, and average sale amount
    Stats {
        #[arg(long)]
        owner: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Login { email, password } => commands::session::login(&email, &password).await?,
        Commands::Logout => commands::session::logout().await?,
        Commands::Whoami => commands::session::whoami()?,
        Commands::Seed { demo_password } => commands::seed::install(demo_password.as_deref())?,
        Commands::Clients { action } => match action {
            ClientAction::List => commands::clients::list()?,
            ClientAction::Search { query } => commands::clients::search(&query)?,
            ClientAction::Create {
                name,
                email,
                password,
                phone,
                company,
                inactive,
            } => commands::clients::create(&name, &email, &password, phone, company, inactive)?,
            ClientAction::Update {
                id,
                name,
                email,
                phone,
                company,
                status,
            } => commands::clients::update(&id, name, email, phone, company, status)?,
            ClientAction::Delete { id } => commands::clients::delete(&id)?,
        },
        Commands::Products { action } => match action {
            ProductAction::List { owner } => commands::products::list(owner.as_deref())?,
            ProductAction::Search { query, owner } => {
                commands::products::search(owner.as_deref(), &query)?;
            }
            ProductAction::Create {
                name,
                description,
                price,
                stock,
                image_url,
                owner,
            } => commands::products::create(
                owner.as_deref(),
                &name,
                &description,
                price,
                stock,
                image_url,
            )?,
            ProductAction::Update {
                id,
                name,
                description,
                price,
                stock,
                image_url,
                owner,
            } => commands::products::update(
                owner.as_deref(),
                &id,
                name,
                description,
                price,
                stock,
                image_url,
            )?,
            ProductAction::Delete { id, owner } => {
                commands::products::delete(owner.as_deref(), &id)?;
            }
        },
        Commands::Sales { action } => match action {
            SaleAction::Record {
                product,
                quantity,
                owner,
            } => commands::sales::record(owner.as_deref(), &product, quantity)?,
            SaleAction::List { owner } => commands::sales::list(owner.as_deref())?,
            SaleAction::Stats { owner } => commands::sales::stats(owner.as_deref())?,
        },
        Commands::Dashboard => commands::dashboard::show()?,
    }
    Ok(())
}
