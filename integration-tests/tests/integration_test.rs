use integration_tests::retrieve_api_endpoint;
use reqwest::Client;
use shared::core::Product;

fn http_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap()
}

#[ignore]
#[tokio::test]
async fn health_check_should_answer() {
    let api_endpoint = retrieve_api_endpoint().await;

    let response = http_client()
        .get(format!("{}health", api_endpoint))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Health Check OK");
}

#[ignore]
#[tokio::test]
async fn product_lifecycle_should_round_trip() {
    let api_endpoint = retrieve_api_endpoint().await;
    let http_client = http_client();
    let product_url = format!("{}product", api_endpoint);

    let created = http_client
        .post(&product_url)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({
                "productId": "it-P2", "Name": "car", "Brand": "Toyota", "Quantity": "5"
            })
            .to_string(),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 200);

    let fetched = http_client
        .get(format!("{}?productId=it-P2", product_url))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), 200);
    assert_eq!(
        fetched.text().await.unwrap(),
        "ID: it-P2\nName: car\nBrand: Toyota\nQuantity: 5"
    );

    let updated = http_client
        .patch(&product_url)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({
                "productId": "it-P2", "Name": "car", "Brand": "Toyota", "Quantity": "7"
            })
            .to_string(),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);

    let listed = http_client
        .get(format!("{}products", api_endpoint))
        .send()
        .await
        .unwrap();
    assert_eq!(listed.status(), 200);
    let products: Vec<Product> = serde_json::from_str(&listed.text().await.unwrap()).unwrap();
    assert!(products
        .iter()
        .any(|p| p.product_id == "it-P2" && p.quantity == 7));

    let deleted = http_client
        .delete(format!("{}?productId=it-P2", product_url))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);

    let missing = http_client
        .get(format!("{}?productId=it-P2", product_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}
