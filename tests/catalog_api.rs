//! End-to-end tests of the product API over real HTTP.

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use product_catalog::catalog::{Product, ProductId};
use product_catalog::client::CatalogClient;
use product_catalog::config::CatalogConfig;

mod common;

#[tokio::test]
async fn test_fresh_service_lists_seed() {
    let server = common::start_server().await;
    let client = CatalogClient::with_client(common::http_client(), &server.url());

    let products = client.list().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].code, "Product Code 1");
    assert_eq!(products[0].name, "Product Item 1");
    assert_eq!(products[0].quantity, 1);
    assert_eq!(products[0].price, Decimal::new(11050, 2));
}

#[tokio::test]
async fn test_create_location_dereferences() {
    let server = common::start_server().await;
    let http = common::http_client();

    let res = http
        .post(server.products_url())
        .json(&json!({"productCode": "X1", "name": "Widget", "quantity": 5, "price": 9.99}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers()["location"].to_str().unwrap().to_string();
    let created: Value = res.json().await.unwrap();
    let id = created["productID"].as_u64().expect("assigned id");
    assert!(location.ends_with(&format!("/api/products/{}", id)));

    let fetched: Value = http.get(&location).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["value"], created);
    assert_eq!(fetched["links"][0]["href"], location);
}

#[tokio::test]
async fn test_full_lifecycle_with_client() {
    let server = common::start_server().await;
    let client = CatalogClient::with_client(common::http_client(), &server.url());

    let created = client
        .create(&Product::new("X1", "Widget", 5, Decimal::new(999, 2)))
        .await
        .unwrap();
    let id = created.product.id;
    assert_eq!(id, ProductId(2));
    assert!(created.location.is_some());

    let mut changes = Product::new("X2", "Gadget", 9, Decimal::new(1500, 2));
    changes.id = id;
    assert!(client.update(id, &changes).await.unwrap());

    let resource = client.get(id).await.unwrap().expect("product exists");
    assert_eq!(resource.value, changes);
    let rels: Vec<&str> = resource.links.iter().map(|l| l.rel.as_str()).collect();
    assert_eq!(rels, vec!["self", "update-product", "delete-product"]);

    assert!(client.delete(id).await.unwrap());
    assert!(client.get(id).await.unwrap().is_none());
    assert!(!client.delete(id).await.unwrap());

    let next = client
        .create(&Product::new("X3", "Sprocket", 1, Decimal::ONE))
        .await
        .unwrap();
    assert!(next.product.id > id, "identifiers must not be reused");
}

#[tokio::test]
async fn test_update_id_mismatch() {
    let server = common::start_server().await;
    let http = common::http_client();

    let res = http
        .put(format!("{}/3", server.products_url()))
        .json(&json!({"productID": 4, "productCode": "C", "name": "N", "quantity": 1, "price": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_without_body() {
    let server = common::start_server().await;
    let res = common::http_client()
        .put(format!("{}/1", server.products_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_on_empty_store() {
    let mut config = CatalogConfig::default();
    config.store.seed_default = false;
    let server = common::start_server_with(config).await;

    let res = common::http_client()
        .delete(format!("{}/999", server.products_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_public_base_url_in_links() {
    let mut config = CatalogConfig::default();
    config.links.public_base_url = Some("https://shop.example.com".into());
    let server = common::start_server_with(config).await;

    let body: Value = common::http_client()
        .get(format!("{}/1", server.products_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    for link in body["links"].as_array().unwrap() {
        assert_eq!(link["href"], "https://shop.example.com/api/products/1");
    }
}

#[tokio::test]
async fn test_xml_round_trip_over_http() {
    let server = common::start_server().await;
    let http = common::http_client();

    let res = http
        .post(server.products_url())
        .header("content-type", "application/xml")
        .header("accept", "application/xml")
        .body(
            "<Product><ProductCode>X1</ProductCode><Name>Widget</Name>\
             <Quantity>5</Quantity><Price>9.99</Price></Product>",
        )
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/xml");
    let xml = res.text().await.unwrap();
    assert!(xml.contains("<ProductID>2</ProductID>"));
    assert!(xml.contains("<Name>Widget</Name>"));
    assert!(xml.contains("<Price>9.99</Price>"));

    let list = http
        .get(server.products_url())
        .header("accept", "application/xml")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(list.starts_with("<ArrayOfProduct>"));
    assert_eq!(list.matches("<Product>").count(), 2);
}

#[tokio::test]
async fn test_health() {
    let server = common::start_server().await;
    let client = CatalogClient::with_client(common::http_client(), &server.url());
    let health = client.health().await.unwrap();
    assert_eq!(health["status"], "operational");
}
