//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod rating;

use clap::{Args, Subcommand, ValueEnum};
use krstore_commerce::search::SortOption;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: String,

        /// Name for a product not in the catalog.
        #[arg(long, requires = "price")]
        name: Option<String>,

        /// Price for a product not in the catalog (e.g. 499.99).
        #[arg(long, requires = "name")]
        price: Option<String>,

        /// Stock for a product not in the catalog.
        #[arg(long)]
        stock: Option<u32>,
    },
    /// Set the quantity of a product in the cart.
    Update {
        /// Product ID.
        id: String,

        /// New quantity (values below 1 are ignored).
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear,
    /// Show subtotal, shipping and total.
    Totals,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products (default).
    List(ListArgs),
    /// Show one product.
    Show {
        /// Product ID.
        id: String,
    },
    /// List brand categories.
    Categories {
        /// Also list each category's products.
        #[arg(short, long)]
        products: bool,
    },
}

/// Product listing filters.
#[derive(Args, Default)]
pub struct ListArgs {
    /// Case-insensitive name search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this brand (repeat for several).
    #[arg(short, long)]
    pub brand: Vec<String>,

    /// Only this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Hide out-of-stock products.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order.
    #[arg(long, value_enum, default_value_t = SortArg::Featured)]
    pub sort: SortArg,

    /// Show at most N products.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Sort order for listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Name,
}

impl From<SortArg> for SortOption {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Featured => SortOption::Featured,
            SortArg::PriceAsc => SortOption::PriceAsc,
            SortArg::PriceDesc => SortOption::PriceDesc,
            SortArg::Name => SortOption::NameAsc,
        }
    }
}

/// Arguments for the rate command.
#[derive(Args)]
pub struct RateArgs {
    /// Product ID.
    pub id: String,

    /// Stars, 1 to 5.
    #[arg(allow_hyphen_values = true)]
    pub stars: i64,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address.
    #[arg(short, long)]
    pub email: String,

    /// Password.
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for the signup command.
#[derive(Args)]
pub struct SignupArgs {
    /// Full name.
    #[arg(short, long)]
    pub name: String,

    /// Email address.
    #[arg(short, long)]
    pub email: String,

    /// Password.
    #[arg(short, long)]
    pub password: String,

    /// Password again.
    #[arg(long)]
    pub confirm: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Payment method: qr or cash (default from config).
    #[arg(short, long)]
    pub payment: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
