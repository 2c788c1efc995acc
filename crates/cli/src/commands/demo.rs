//! Scripted storefront walkthrough against the in-memory backend.
//!
//! Exercises the full engine surface the way the real screens drive it: the
//! admin seeds the catalog, a shopper registers, browses, fills a cart,
//! checks out, and reviews order history; the admin console then toggles a
//! role and reads the dashboard. Progress is narrated through tracing.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use greenbasket_admin::{ProductAdmin, UserAdmin, fetch_stats};
use greenbasket_core::{ProductDraft, UserId};
use greenbasket_store::{DocumentStore, MemoryStore};
use greenbasket_storefront::account::{self, NewProfile};
use greenbasket_storefront::{CartService, CatalogFeed, Checkout, OrdersFeed, Session, catalog, view};

use crate::commands::seed;
use crate::config::CliConfig;

/// Built-in sample catalog used when no seed file is given.
fn sample_products() -> Vec<ProductDraft> {
    let draft = |name: &str, price: f64, category: &str, stock: u32| ProductDraft {
        name: name.to_string(),
        price,
        description: String::new(),
        category: category.to_string(),
        stock,
        image_url: String::new(),
    };

    vec![
        draft("Apple", 2.5, "fruit", 40),
        draft("Banana", 0.8, "fruit", 60),
        draft("Sourdough Loaf", 6.0, "bakery", 12),
    ]
}

/// Run the walkthrough.
///
/// # Errors
///
/// Any engine or seed-file error aborts the demo.
pub async fn run(
    config: &CliConfig,
    seed_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    // Admin seeds the catalog.
    let products_admin = ProductAdmin::new(Arc::clone(&store));
    let drafts = match seed_file {
        Some(path) => seed::load(path).await?,
        None => sample_products(),
    };
    for draft in &drafts {
        let id = products_admin.create(draft).await?;
        info!(product = %id, name = %draft.name, "Product created");
    }

    // A shopper registers and signs in.
    let user = UserId::new("demo-shopper");
    account::create_profile(
        &store,
        &user,
        &NewProfile {
            name: "Demo Shopper".to_string(),
            email: "shopper@example.com".to_string(),
            phone: None,
        },
    )
    .await?;
    let session = Session::signed_in(user);
    let shopper = session.require_user()?;
    info!(user = %shopper, "Shopper registered");

    // Browse the catalog.
    let mut catalog_feed = CatalogFeed::attach(&store).await?;
    let products = catalog_feed.changed().await?.to_vec();
    info!(products = products.len(), "Catalog mirror attached");

    let query = "a";
    let hits = catalog::search(&products, query);
    info!(query, hits = hits.len(), "Search results");

    let first = products
        .first()
        .cloned()
        .ok_or("the catalog is empty; seed at least one product")?;

    // Fill the cart. Re-adding the same product overwrites the line.
    let cart = CartService::new(Arc::clone(&store));
    cart.add_item(shopper, &first, 1).await?;
    cart.add_item(shopper, &first, 2).await?;
    if let Some(second) = products.get(1) {
        cart.add_item(shopper, second, 3).await?;
    }

    let mut cart_feed = cart.watch(shopper).await?;
    let lines = cart_feed.changed().await?.to_vec();
    info!(
        lines = lines.len(),
        total = %view::format_total(&config.currency_symbol, &lines),
        "Cart ready"
    );

    // Check out.
    let checkout = Checkout::new(Arc::clone(&store));
    let receipt = checkout.place_order(shopper, &lines).await?;
    info!(
        order = %receipt.order_id,
        total = %greenbasket_core::types::money::format_price(&config.currency_symbol, receipt.total),
        cart_cleared = receipt.cart_cleared,
        "Order placed"
    );

    let remaining = cart_feed.changed().await?;
    info!(lines = remaining.len(), "Cart after checkout");

    // Review order history.
    let mut orders_feed = OrdersFeed::attach(&store, shopper).await?;
    for order in orders_feed.changed().await? {
        info!(
            reference = %order.short_ref(),
            status = %order.status,
            color = order.status.color().hex(),
            total = %greenbasket_core::types::money::format_price(&config.currency_symbol, order.total),
            "Order"
        );
    }

    // Admin console: promote the shopper, then read the dashboard.
    let users_admin = UserAdmin::new(Arc::clone(&store));
    let mut directory = users_admin.watch().await?;
    let profile = directory
        .changed()
        .await?
        .first()
        .cloned()
        .ok_or("user directory is empty")?;
    let promoted = users_admin.toggle_admin(&profile).await?;
    info!(user = %profile.id, is_admin = promoted, "Admin flag toggled");

    let stats = fetch_stats(&store).await?;
    info!(
        products = stats.total_products,
        users = stats.total_users,
        orders = stats.total_orders,
        "Dashboard"
    );

    // Screens are going away: tear the subscriptions down.
    catalog_feed.cancel();
    cart_feed.cancel();
    orders_feed.cancel();
    directory.cancel();

    info!("Demo complete");
    Ok(())
}
