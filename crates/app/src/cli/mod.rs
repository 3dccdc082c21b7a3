//! Storefront command line.
#![expect(clippy::print_stdout, reason = "command output goes to stdout")]

use clap::{Parser, Subcommand};
use storefront_app::{config::AppConfig, context::AppContext};

mod auth;
mod cart;
mod catalog;
mod checkout;
mod db;
mod orders;
mod render;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered, searched and sorted
    Products(catalog::ProductsArgs),

    /// List product categories
    Categories,

    /// Show a single product
    Product(catalog::ProductArgs),

    /// Show or change the cart
    Cart(cart::CartCommand),

    /// Pay for the cart and place an order
    Checkout,

    /// List the signed-in user's orders
    Orders,

    /// Sign in, sign up, sign out or reset a password
    Auth(auth::AuthCommand),

    /// Order ledger database maintenance
    Db(db::DbCommand),
}

impl Cli {
    /// Run the command against a freshly initialised context, saving the
    /// cart and session afterwards even when the command fails.
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::init(&self.config)
            .await
            .map_err(|error| format!("failed to start: {error}"))?;

        let result = match self.command {
            Commands::Products(args) => catalog::products(&context, args).await,
            Commands::Categories => catalog::categories(&context).await,
            Commands::Product(args) => catalog::product(&context, args).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Checkout => checkout::run(&context).await,
            Commands::Orders => orders::run(&context).await,
            Commands::Auth(command) => auth::run(&context, command).await,
            Commands::Db(command) => db::run(&self.config, command).await,
        };

        let saved = context
            .shutdown()
            .await
            .map_err(|error| format!("failed to save local state: {error}"));

        result.and(saved)
    }
}
