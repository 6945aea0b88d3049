use lambda_http::http::StatusCode;
use lambda_http::{Error, Response};
use shared::core::{Product, ProductRepository};
use shared::utils::{api_response, json_response};

/// Runs one store call per operation and turns the outcome into a response.
/// Store error details go to the logs only.
#[derive(Debug)]
pub(crate) struct ProductService<R: ProductRepository> {
    product_repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(product_repo: R) -> Self {
        Self { product_repo }
    }

    pub fn health_check(&self) -> Result<Response<String>, Error> {
        api_response(&StatusCode::OK, "Health Check OK")
    }

    pub async fn list_products(&self) -> Result<Response<String>, Error> {
        match self.product_repo.list_products().await {
            Ok(products) => {
                tracing::info!("Listed {} products", products.len());
                json_response(&StatusCode::OK, &products)
            }
            Err(e) => {
                tracing::error!("Failed to list products: {}", e);
                api_response(&StatusCode::BAD_REQUEST, "Failed to retrieve products!")
            }
        }
    }

    /// Absent products and store failures both answer 404.
    pub async fn get_product(&self, product_id: &str) -> Result<Response<String>, Error> {
        match self.product_repo.get_product(product_id).await {
            Ok(Some(product)) => api_response(&StatusCode::OK, &product.summary()),
            Ok(None) => {
                tracing::info!("Could not find product: {}", product_id);
                not_found(product_id)
            }
            Err(e) => {
                tracing::error!("Failed to get product {}: {}", product_id, e);
                not_found(product_id)
            }
        }
    }

    pub async fn create_product(&self, product: Product) -> Result<Response<String>, Error> {
        tracing::info!("Add product: {:?}", product);
        match self.product_repo.save_product(product).await {
            Ok(()) => api_response(&StatusCode::OK, "Product added successfully"),
            Err(e) => {
                tracing::error!("Failed to add product: {}", e);
                api_response(&StatusCode::BAD_REQUEST, "Failed to add product!")
            }
        }
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<Response<String>, Error> {
        match self.product_repo.delete_product(product_id).await {
            Ok(()) => api_response(
                &StatusCode::OK,
                &format!("Product deleted successfully: {}", product_id),
            ),
            Err(e) => {
                tracing::error!("Failed to delete product {}: {}", product_id, e);
                api_response(
                    &StatusCode::BAD_REQUEST,
                    &format!("Failed to delete product: {}", product_id),
                )
            }
        }
    }

    pub async fn update_product(&self, product: Product) -> Result<Response<String>, Error> {
        tracing::info!("Update product: {:?}", product);
        let product_id = product.product_id.clone();
        match self.product_repo.update_product(product).await {
            Ok(()) => api_response(
                &StatusCode::OK,
                &format!("Product: {} updated successfully", product_id),
            ),
            Err(e) => {
                tracing::error!("Failed to update product {}: {}", product_id, e);
                api_response(&StatusCode::BAD_REQUEST, "Failed to update product!")
            }
        }
    }

    pub fn missing_product_id(&self) -> Result<Response<String>, Error> {
        tracing::warn!("Invalid Request! productId in query parameter is missing");
        api_response(
            &StatusCode::BAD_REQUEST,
            "Invalid Request! productId in query parameter is missing",
        )
    }

    pub fn route_not_found(&self) -> Result<Response<String>, Error> {
        tracing::warn!("Invalid Request!");
        api_response(&StatusCode::NOT_FOUND, "Bad Request")
    }
}

fn not_found(product_id: &str) -> Result<Response<String>, Error> {
    api_response(
        &StatusCode::NOT_FOUND,
        &format!("Failed to find requested product: {}", product_id),
    )
}
