use clap::Args;
use storefront::products::{Category, ProductId, ProductSort};
use storefront_app::context::AppContext;

use crate::cli::render;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Category tag, `all` for every product
    #[arg(long, default_value = Category::ALL)]
    category: String,

    /// Case-insensitive title filter
    #[arg(long, default_value = "")]
    search: String,

    /// Ordering: price-low-high, price-high-low or popularity
    #[arg(long, default_value = "popularity")]
    sort: ProductSort,
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    id: u64,
}

pub(crate) async fn products(context: &AppContext, args: ProductsArgs) -> Result<(), String> {
    context.browser.set_search(args.search);
    context.browser.set_sort(args.sort);

    let products = context
        .browser
        .select_category(Category::new(args.category))
        .await
        .map_err(|error| format!("failed to load products: {error}"))?
        .unwrap_or_else(|| context.browser.visible());

    if products.is_empty() {
        println!("no products found");

        return Ok(());
    }

    let currency = context.cart.snapshot().currency().to_string();

    for product in &products {
        println!(
            "{:>5}  {:>12}  {}  [{}]",
            product.id,
            render::amount(product.price, &currency),
            product.title,
            product.category.label()
        );
    }

    Ok(())
}

pub(crate) async fn categories(context: &AppContext) -> Result<(), String> {
    let categories = context
        .browser
        .categories()
        .await
        .map_err(|error| format!("failed to load categories: {error}"))?;

    for category in &categories {
        println!("{:<20} {}", category.label(), category.as_str());
    }

    Ok(())
}

pub(crate) async fn product(context: &AppContext, args: ProductArgs) -> Result<(), String> {
    let product = context
        .catalog
        .get_product(ProductId::new(args.id))
        .await
        .map_err(|error| format!("failed to load product: {error}"))?;

    let currency = context.cart.snapshot().currency().to_string();

    println!("{} (#{})", product.title, product.id);
    println!("{}", product.category.label());
    println!("{}", render::amount(product.price, &currency));

    if let Some(rating) = product.rating {
        println!("rated {:.1} by {} reviewers", rating.rate, rating.count);
    }

    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    Ok(())
}
