use storefront_app::{context::AppContext, domain::checkout::CheckoutOutcome};

use crate::cli::render;

pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    render::cart(&context.cart.snapshot());
    println!();

    match context.checkout.run().await {
        Ok(CheckoutOutcome::Completed(order)) => {
            println!(
                "order {} placed, {} charged",
                order.id,
                render::amount(order.total, &order.currency)
            );

            Ok(())
        }
        Ok(CheckoutOutcome::Cancelled) => {
            println!("payment cancelled, cart kept");

            Ok(())
        }
        Err(error) => Err(format!("{}: {}", error.title(), error.user_message())),
    }
}
