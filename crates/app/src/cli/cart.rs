use std::sync::Arc;

use clap::{Args, Subcommand};
use storefront::products::ProductId;
use storefront_app::context::AppContext;

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: Option<CartSubcommand>,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart contents and totals
    Show,

    /// Add one unit of a product
    Add(ItemArgs),

    /// Remove a product entirely
    Remove(ItemArgs),

    /// Add one more unit of a product already in the cart
    Inc(ItemArgs),

    /// Take away one unit, never below one
    Dec(ItemArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// Product id
    id: u64,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let cart = &context.cart;

    match command.command.unwrap_or(CartSubcommand::Show) {
        CartSubcommand::Show => {}
        CartSubcommand::Add(ItemArgs { id }) => {
            let product = context
                .catalog
                .get_product(ProductId::new(id))
                .await
                .map_err(|error| format!("failed to load product: {error}"))?;

            cart.add_item(Arc::new(product));
        }
        CartSubcommand::Remove(ItemArgs { id }) => cart.remove_item(ProductId::new(id)),
        CartSubcommand::Inc(ItemArgs { id }) => cart.increment_quantity(ProductId::new(id)),
        CartSubcommand::Dec(ItemArgs { id }) => cart.decrement_quantity(ProductId::new(id)),
        CartSubcommand::Clear => cart.clear(),
    }

    render::cart(&cart.snapshot());

    Ok(())
}
