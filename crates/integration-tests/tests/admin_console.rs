//! Admin console scenarios: catalog management reflected into shopper
//! mirrors, admin-flag toggling, and dashboard counts.

use std::sync::Arc;

use serde_json::json;

use greenbasket_admin::{AdminError, ProductAdmin, UserAdmin, fetch_stats};
use greenbasket_core::{UserId, paths};
use greenbasket_integration_tests::{TestContext, draft};
use greenbasket_store::DocumentStore;
use greenbasket_storefront::CatalogFeed;
use greenbasket_storefront::account::{self, NewProfile};

#[tokio::test]
async fn test_admin_edits_reach_shopper_catalog_mirrors() {
    let ctx = TestContext::new();
    let admin = ProductAdmin::new(ctx.store());

    let mut catalog = CatalogFeed::attach(&ctx.store()).await.expect("attach");
    assert!(catalog.changed().await.expect("initial").is_empty());

    let id = admin.create(&draft("Apple", 2.5, 10)).await.expect("create");
    assert_eq!(catalog.changed().await.expect("after create").len(), 1);

    admin
        .update(&id, &draft("Apple (new crop)", 3.0, 8))
        .await
        .expect("update");
    let products = catalog.changed().await.expect("after update");
    assert_eq!(products[0].name, "Apple (new crop)");
    assert!((products[0].price - 3.0).abs() < f64::EPSILON);

    admin.delete(&id).await.expect("delete");
    assert!(catalog.changed().await.expect("after delete").is_empty());
}

#[tokio::test]
async fn test_invalid_drafts_never_reach_the_store() {
    let ctx = TestContext::new();
    let admin = ProductAdmin::new(ctx.store());

    let blank = admin.create(&draft("  ", 1.0, 1)).await;
    assert!(matches!(blank, Err(AdminError::InvalidProduct(_))));

    let negative = admin.create(&draft("Apple", -0.5, 1)).await;
    assert!(matches!(negative, Err(AdminError::InvalidProduct(_))));

    let raw = ctx.store().get(paths::PRODUCTS).await.expect("raw read");
    assert!(raw.is_empty());
}

#[tokio::test]
async fn test_toggling_admin_twice_restores_original_value() {
    let ctx = TestContext::new();
    let store = ctx.store();

    account::create_profile(
        &store,
        &UserId::new("u1"),
        &NewProfile {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
        },
    )
    .await
    .expect("register");

    let users = UserAdmin::new(Arc::clone(&store));
    let mut directory = users.watch().await.expect("watch");

    let original = directory.changed().await.expect("initial")[0].clone();
    assert!(!original.is_admin);

    users.toggle_admin(&original).await.expect("promote");
    let promoted = directory.changed().await.expect("promoted")[0].clone();
    assert!(promoted.is_admin);

    users.toggle_admin(&promoted).await.expect("demote");
    let demoted = directory.changed().await.expect("demoted")[0].clone();
    assert_eq!(demoted.is_admin, original.is_admin);
}

#[tokio::test]
async fn test_admin_can_demote_the_last_admin() {
    // There is deliberately no self-demotion guard.
    let ctx = TestContext::new();
    let store = ctx.store();

    store
        .set(
            &paths::user(&UserId::new("root")),
            json!({"name": "Root", "email": "root@example.com", "isAdmin": true}),
        )
        .await
        .expect("seed admin");

    let users = UserAdmin::new(Arc::clone(&store));
    let mut directory = users.watch().await.expect("watch");
    let only_admin = directory.changed().await.expect("initial")[0].clone();

    let now_admin = users.toggle_admin(&only_admin).await.expect("demote");
    assert!(!now_admin, "the only admin demoted themselves");
}

#[tokio::test]
async fn test_user_deletion_leaves_orders_behind() {
    let ctx = TestContext::new();
    let store = ctx.store();
    let user = UserId::new("u1");

    account::create_profile(
        &store,
        &user,
        &NewProfile {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
        },
    )
    .await
    .expect("register");

    store
        .add(
            paths::ORDERS,
            json!({"userId": "u1", "items": [], "total": 5.0, "status": "pending"}),
        )
        .await
        .expect("seed order");

    UserAdmin::new(Arc::clone(&store))
        .delete(&user)
        .await
        .expect("delete user");

    assert!(store.get(paths::USERS).await.expect("users").is_empty());
    // Orders are never deleted by client code.
    assert_eq!(store.get(paths::ORDERS).await.expect("orders").len(), 1);
}

#[tokio::test]
async fn test_dashboard_counts_span_all_collections() {
    let ctx = TestContext::new();
    let store = ctx.store();

    ctx.seed_catalog(&[draft("Apple", 2.5, 10), draft("Banana", 0.8, 20)])
        .await;
    account::create_profile(
        &store,
        &UserId::new("u1"),
        &NewProfile {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
        },
    )
    .await
    .expect("register");
    store
        .add(
            paths::ORDERS,
            json!({"userId": "u1", "items": [], "total": 5.0, "status": "pending"}),
        )
        .await
        .expect("seed order");

    let stats = fetch_stats(&store).await.expect("stats");
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.total_orders, 1);
}
