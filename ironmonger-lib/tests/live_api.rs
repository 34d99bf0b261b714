//! Integration tests against a live storefront deployment.
//!
//! These tests require a reachable API and a valid session token, and are
//! ignored by default. To run them, create a `.env` file in the
//! ironmonger-lib directory with:
//!
//! ```env
//! IRONMONGER_URL=https://shop.example.com
//! IRONMONGER_TOKEN=your-session-token
//! ```
//!
//! Then run: `cargo test -p ironmonger-lib -- --ignored`

use std::env;

use ironmonger_lib::StoreClient;
use ironmonger_lib::api::query::ListQuery;
use ironmonger_lib::auth::StaticSessionProvider;

fn load_env() -> Option<(String, String)> {
    let _ = dotenvy::dotenv();

    let url = env::var("IRONMONGER_URL").ok()?;
    let token = env::var("IRONMONGER_TOKEN").ok()?;

    Some((url, token))
}

fn client() -> StoreClient {
    let (url, token) = load_env().expect("Missing required environment variables. See module docs.");
    StoreClient::builder()
        .url(url)
        .session_provider(StaticSessionProvider::new(token))
        .build()
}

#[tokio::test]
#[ignore = "requires a live storefront in .env"]
async fn test_connect() {
    let client = client();
    let me = client.connect().await.expect("connect failed");
    assert!(!me.email.is_empty());
}

#[tokio::test]
#[ignore = "requires a live storefront in .env"]
async fn test_list_products_first_page() {
    let client = client();
    let response = client
        .products(&ListQuery::new().page(1).limit(5))
        .await
        .expect("product listing failed");

    let page = response.into_inner();
    assert!(page.len() <= 5);
    assert!(page.total_pages() >= 1);
}

#[tokio::test]
#[ignore = "requires a live storefront in .env"]
async fn test_second_catalog_read_is_replayed() {
    let client = client();
    let query = ListQuery::new().page(1).limit(5);

    let first = client.products(&query).await.expect("first read failed");
    assert!(!first.is_replayed());

    let second = client.products(&query).await.expect("second read failed");
    assert!(second.is_replayed());
    assert_eq!(second.fetched_at(), first.fetched_at());
}
