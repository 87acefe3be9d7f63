//! KR Store CLI - a terminal storefront over the local cart.
//!
//! Commands:
//! - `krstore cart` - Show and change the cart
//! - `krstore catalog` - Browse products and brand categories
//! - `krstore rate` / `krstore ratings` - Rate products
//! - `krstore login` / `signup` / `logout` / `whoami` - Mock account
//! - `krstore checkout` - Place an order for the cart
//! - `krstore config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, LoginArgs, RateArgs, SignupArgs,
};

/// KR Store - browse the catalog, manage the cart and place orders
#[derive(Parser)]
#[command(name = "krstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the cart
    Cart(CartArgs),

    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Rate a product from 1 to 5 stars
    Rate(RateArgs),

    /// List your product ratings
    Ratings,

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Signup(SignupArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&ctx.config.logging.level, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Rate(args) => commands::rating::rate(args, &ctx),
        Commands::Ratings => commands::rating::list(&ctx),
        Commands::Login(args) => commands::auth::login(args, &ctx),
        Commands::Signup(args) => commands::auth::signup(args, &ctx),
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
