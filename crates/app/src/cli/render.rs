//! Terminal rendering for amounts and the cart.

use rust_decimal::Decimal;
use storefront::{
    carts::Cart,
    pricing::{PricingSnapshot, format_amount},
};

/// `$27.00` style amount, or the bare number and code for currencies
/// without formatting data.
pub(crate) fn amount(amount: Decimal, currency: &str) -> String {
    format_amount(amount, currency).unwrap_or_else(|_| format!("{amount} {currency}"))
}

pub(crate) fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("cart is empty");

        return;
    }

    let currency = cart.currency();

    for item in cart.items() {
        let product = item.product();
        let line_total = product.price * Decimal::from(item.quantity());

        println!(
            "{:>5}  {:>3} x {:<48} {:>12}",
            product.id,
            item.quantity(),
            product.title,
            amount(line_total, currency)
        );
    }

    let PricingSnapshot {
        subtotal,
        tax,
        total,
    } = PricingSnapshot::for_cart(cart);

    println!();
    println!("{:>60} {:>12}", "Subtotal", amount(subtotal, currency));
    println!("{:>60} {:>12}", "Tax", amount(tax, currency));
    println!("{:>60} {:>12}", "Total", amount(total, currency));
}
