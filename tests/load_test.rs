//! Concurrent load against the catalog.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::time::Instant;

use product_catalog::catalog::Product;
use product_catalog::client::CatalogClient;

mod common;

#[tokio::test]
async fn test_concurrent_creates() {
    let server = common::start_server().await;

    let concurrency = 20;
    let requests_per_task = 25;
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = CatalogClient::with_client(common::http_client(), &server.url());
        tasks.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..requests_per_task {
                let product = Product::new(
                    format!("T{}-{}", task, i),
                    "Load item",
                    i,
                    Decimal::new(i64::from(i) * 100 + 99, 2),
                );
                let created = client.create(&product).await.expect("create succeeds");
                ids.push(created.product.id);
            }
            ids
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        for id in task.await.unwrap() {
            assert!(ids.insert(id), "duplicate identifier {}", id);
        }
    }

    let elapsed = start.elapsed();
    let total = (concurrency * requests_per_task) as usize;
    println!("{} creates in {:?}", total, elapsed);

    assert_eq!(ids.len(), total);
    let client = CatalogClient::with_client(common::http_client(), &server.url());
    assert_eq!(client.list().await.unwrap().len(), total + 1);
}
