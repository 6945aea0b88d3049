use lambda_http::http::Method;
use lambda_http::{Request, RequestExt};
use shared::core::Product;

const HEALTH_PATH: &str = "/health";
const PRODUCT_PATH: &str = "/product";
const PRODUCTS_PATH: &str = "/products";

/// The operation selected for an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    HealthCheck,
    ListProducts,
    GetProduct(String),
    CreateProduct(Product),
    DeleteProduct(String),
    UpdateProduct(Product),
    MissingProductId,
    NotFound,
}

impl Route {
    pub fn from_request(event: &Request) -> Self {
        let query_params = event.query_string_parameters();
        Self::resolve(
            event.method(),
            event.raw_http_path(),
            query_params.first("productId"),
            event.body(),
        )
    }

    /// First matching arm wins. Write bodies are decoded permissively, see
    /// [`Product::from_body`].
    pub fn resolve(method: &Method, path: &str, product_id: Option<&str>, body: &[u8]) -> Self {
        match (method, path, product_id) {
            (&Method::GET, HEALTH_PATH, _) => Route::HealthCheck,
            (&Method::GET, PRODUCTS_PATH, _) => Route::ListProducts,
            (&Method::GET, PRODUCT_PATH, Some(id)) => Route::GetProduct(id.to_string()),
            (&Method::GET, PRODUCT_PATH, None) => Route::MissingProductId,
            (&Method::POST, PRODUCT_PATH, _) => Route::CreateProduct(Product::from_body(body)),
            (&Method::DELETE, PRODUCT_PATH, Some(id)) => Route::DeleteProduct(id.to_string()),
            (&Method::DELETE, PRODUCT_PATH, None) => Route::MissingProductId,
            (&Method::PATCH, PRODUCT_PATH, _) => Route::UpdateProduct(Product::from_body(body)),
            _ => Route::NotFound,
        }
    }
}
