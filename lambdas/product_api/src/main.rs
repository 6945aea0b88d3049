use crate::config::Config;
use crate::http_handler::{function_handler, HandlerDeps};
use crate::product_service::ProductService;
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbProductRepository;

mod config;
mod http_handler;
mod product_service;
mod router;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    tracing::info!("DynamoDB client initialized");

    let env = Config::load()?;
    tracing::info!("Table name: {}", env.table_name);
    let product_repo = DynamoDbProductRepository::new(env.table_name, dynamodb_client);
    let deps = HandlerDeps {
        product_service: ProductService::new(product_repo),
    };

    run(service_fn(|event| function_handler(&deps, event))).await
}
