use storefront_app::context::AppContext;

use crate::cli::render;

pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    let Some(user) = context.sessions.current() else {
        return Err("Login Required: sign in to see your orders".to_string());
    };

    let orders = context
        .orders
        .list_orders_for_user(&user.id)
        .await
        .map_err(|error| format!("failed to load orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders yet");

        return Ok(());
    }

    for order in &orders {
        println!(
            "{}  {}  {:>3} items  {:>12}",
            order.created_at.strftime("%Y-%m-%d %H:%M"),
            order.id,
            order.unit_count(),
            render::amount(order.total, &order.currency)
        );
    }

    Ok(())
}
