//! Level-Up Gamer CLI - storefront front end for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! lvl-cli products list
//! lvl-cli products show 7
//!
//! # Manage the local cart
//! lvl-cli cart add 7 --quantity 2
//! lvl-cli cart show
//! lvl-cli cart remove 7
//!
//! # Session
//! lvl-cli auth login -u carolina -p secreta
//! lvl-cli auth whoami
//! lvl-cli auth logout
//!
//! # Submit the cart as an order (requires login)
//! lvl-cli checkout
//!
//! # Back-office (requires an admin session)
//! lvl-cli admin users list
//! lvl-cli admin orders list
//! ```
//!
//! Cart and session state persist under the storage directory
//! (`LEVELUP_STORAGE_DIR`, default `.levelup`), playing the role browser
//! local storage plays for the web front end.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use levelup_storefront::api::ApiClient;
use levelup_storefront::cart::CartRepository;
use levelup_storefront::config::ClientConfig;
use levelup_storefront::session::AuthSessionManager;
use levelup_storefront::storage::{FileStorage, Store};

mod commands;

#[derive(Parser)]
#[command(name = "lvl-cli")]
#[command(author, version, about = "Level-Up Gamer storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the local shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Login, logout and session info
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Submit the current cart as an order
    Checkout,
    /// Admin back-office operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List the public catalog
    List,
    /// Show one product by id
    Show { id: i64 },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a catalog product to the cart
    Add {
        /// Product id from the catalog
        id: i64,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { id: i64 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(short = 'n', long)]
        full_name: String,

        #[arg(short, long)]
        age: u8,

        #[arg(short, long)]
        region: String,

        #[arg(short, long)]
        commune: String,
    },
    /// Log out and purge the persisted session
    Logout,
    /// Show the current session
    Whoami,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Manage catalog products
    Products {
        #[command(subcommand)]
        action: AdminProductsAction,
    },
    /// Manage registered users
    Users {
        #[command(subcommand)]
        action: AdminUsersAction,
    },
    /// List orders
    Orders {
        #[command(subcommand)]
        action: AdminOrdersAction,
    },
}

#[derive(Subcommand)]
enum AdminProductsAction {
    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        price: rust_decimal::Decimal,

        /// Category id the product belongs to
        #[arg(short, long)]
        category: i64,
    },
    /// Update a product
    Update {
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        price: rust_decimal::Decimal,

        #[arg(short, long)]
        category: i64,
    },
    /// Delete a product
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum AdminUsersAction {
    /// List registered users
    List,
    /// Delete a user account
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum AdminOrdersAction {
    /// List all orders
    List,
}

/// Everything a command needs, built once at startup.
struct Context {
    api: ApiClient,
    cart: CartRepository,
    session: AuthSessionManager,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let store = Store::new(Arc::new(FileStorage::new(config.storage_dir.clone())));
    let mut ctx = Context {
        api: ApiClient::new(&config),
        cart: CartRepository::new(store.clone()),
        session: AuthSessionManager::restore(store),
    };

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List => commands::catalog::list(&ctx.api).await?,
            ProductsAction::Show { id } => commands::catalog::show(&ctx.api, id.into()).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx.cart),
            CartAction::Add { id, quantity } => {
                commands::cart::add(&ctx.api, &ctx.cart, id.into(), quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&ctx.cart, id.into()),
            CartAction::Clear => commands::cart::clear(&ctx.cart),
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { username, password } => {
                commands::auth::login(&mut ctx, &username, &password).await?;
            }
            AuthAction::Register {
                username,
                email,
                password,
                full_name,
                age,
                region,
                commune,
            } => {
                commands::auth::register(
                    &ctx.api, username, email, password, full_name, age, region, commune,
                )
                .await?;
            }
            AuthAction::Logout => commands::auth::logout(&mut ctx.session),
            AuthAction::Whoami => commands::auth::whoami(&ctx.session),
        },
        Commands::Checkout => commands::checkout::submit(&mut ctx).await?,
        Commands::Admin { action } => match action {
            AdminAction::Products { action } => match action {
                AdminProductsAction::Create {
                    name,
                    description,
                    price,
                    category,
                } => {
                    commands::admin::create_product(
                        &mut ctx,
                        name,
                        description,
                        price,
                        category.into(),
                    )
                    .await?;
                }
                AdminProductsAction::Update {
                    id,
                    name,
                    description,
                    price,
                    category,
                } => {
                    commands::admin::update_product(
                        &mut ctx,
                        id.into(),
                        name,
                        description,
                        price,
                        category.into(),
                    )
                    .await?;
                }
                AdminProductsAction::Delete { id } => {
                    commands::admin::delete_product(&mut ctx, id.into()).await?;
                }
            },
            AdminAction::Users { action } => match action {
                AdminUsersAction::List => commands::admin::list_users(&mut ctx).await?,
                AdminUsersAction::Delete { id } => {
                    commands::admin::delete_user(&mut ctx, id.into()).await?;
                }
            },
            AdminAction::Orders { action } => match action {
                AdminOrdersAction::List => commands::admin::list_orders(&mut ctx).await?,
            },
        },
    }
    Ok(())
}
