use crate::product_service::ProductService;
use crate::router::Route;
use lambda_http::{Error, IntoResponse, Request};
use shared::core::ProductRepository;

pub(crate) struct HandlerDeps<R: ProductRepository> {
    pub product_service: ProductService<R>,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<R: ProductRepository>(
    deps: &HandlerDeps<R>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let service = &deps.product_service;
    match Route::from_request(&event) {
        Route::HealthCheck => service.health_check(),
        Route::ListProducts => service.list_products().await,
        Route::GetProduct(product_id) => service.get_product(&product_id).await,
        Route::CreateProduct(product) => service.create_product(product).await,
        Route::DeleteProduct(product_id) => service.delete_product(&product_id).await,
        Route::UpdateProduct(product) => service.update_product(product).await,
        Route::MissingProductId => service.missing_product_id(),
        Route::NotFound => service.route_not_found(),
    }
}
