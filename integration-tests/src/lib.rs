use aws_sdk_cloudformation::types::Output;
use std::env;

/// Reads the deployed API base URL from the stack outputs. The stack defaults to
/// `product-inventory` and can be overridden with `STACK_NAME`.
pub async fn retrieve_api_endpoint() -> String {
    let config = aws_config::load_from_env().await;
    let cloudformation_client = aws_sdk_cloudformation::Client::new(&config);
    let stack_name = env::var("STACK_NAME").unwrap_or("product-inventory".to_string());

    let get_stacks = cloudformation_client
        .describe_stacks()
        .set_stack_name(Some(stack_name))
        .send()
        .await
        .unwrap();

    let outputs = get_stacks.stacks.unwrap()[0].clone().outputs.unwrap();
    let api_outputs: Vec<Output> = outputs
        .into_iter()
        .filter(|output| output.output_key.as_deref() == Some("ProductApiEndpoint"))
        .collect();

    api_outputs[0].clone().output_value.unwrap()
}
