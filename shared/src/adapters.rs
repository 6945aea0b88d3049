use crate::core::{Product, ProductRepository, RepositoryError};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    types::{AttributeValue, ReturnValue},
    Client,
};
use std::collections::HashMap;

const PRODUCT_ID: &str = "productId";
const NAME: &str = "Name";
const BRAND: &str = "Brand";
const QUANTITY: &str = "Quantity";

#[derive(Debug)]
pub struct DynamoDbProductRepository {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbProductRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

#[async_trait]
impl ProductRepository for DynamoDbProductRepository {
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, RepositoryError> {
        let result = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, AttributeValue::S(product_id.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::Store(format!("Error getting item: {:?}", e)))?;

        result.item.map(Product::try_from).transpose()
    }

    async fn save_product(&self, product: Product) -> Result<(), RepositoryError> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .item(PRODUCT_ID, AttributeValue::S(product.product_id))
            .item(NAME, AttributeValue::S(product.name))
            .item(QUANTITY, AttributeValue::S(product.quantity.to_string()))
            .item(BRAND, AttributeValue::S(product.brand))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::Store(format!("Error adding item: {:?}", e)))
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products = vec![];
        let mut exclusive_start_key = None;

        loop {
            let result = self
                .dynamodb_client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| RepositoryError::Store(format!("Error executing scan: {:?}", e)))?;

            products.extend(decode_items(result.items.unwrap_or_default()));

            exclusive_start_key = next_start_key(result.last_evaluated_key);
            if exclusive_start_key.is_none() {
                break;
            }
        }

        Ok(products)
    }

    async fn update_product(&self, product: Product) -> Result<(), RepositoryError> {
        self.dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, AttributeValue::S(product.product_id))
            .update_expression("SET #nm = :n, #br = :b, #qt = :q")
            .expression_attribute_names("#nm", NAME)
            .expression_attribute_names("#br", BRAND)
            .expression_attribute_names("#qt", QUANTITY)
            .expression_attribute_values(":n", AttributeValue::S(product.name))
            .expression_attribute_values(":b", AttributeValue::S(product.brand))
            .expression_attribute_values(":q", AttributeValue::S(product.quantity.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::Store(format!("Error updating item: {:?}", e)))
    }

    async fn delete_product(&self, product_id: &str) -> Result<(), RepositoryError> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, AttributeValue::S(product_id.to_string()))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::Store(format!("Error deleting item: {:?}", e)))
    }
}

type Item = HashMap<String, AttributeValue>;

/// Decodes one scan page; items that do not convert are logged and skipped.
fn decode_items(items: Vec<Item>) -> Vec<Product> {
    items
        .into_iter()
        .filter_map(|item| match Product::try_from(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!("Skipping item: {}", e);
                None
            }
        })
        .collect()
}

/// The scan is exhausted once DynamoDB stops returning a `LastEvaluatedKey`.
fn next_start_key(last_evaluated_key: Option<Item>) -> Option<Item> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

impl TryFrom<Item> for Product {
    type Error = RepositoryError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        let product_id = item
            .get(PRODUCT_ID)
            .ok_or_else(|| RepositoryError::Malformed("productId not found".to_string()))?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| RepositoryError::Malformed("productId is not a String".to_string()))?;
        let name = item
            .get(NAME)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .unwrap_or_default();
        let brand = item
            .get(BRAND)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .unwrap_or_default();
        // written as S by this service, N is tolerated for items added by hand
        let quantity = match item.get(QUANTITY) {
            None => 0,
            Some(AttributeValue::S(n)) | Some(AttributeValue::N(n)) => {
                n.trim().parse::<i64>().map_err(|_| {
                    RepositoryError::Malformed(format!(
                        "Cannot convert Quantity of {} into an integer",
                        product_id
                    ))
                })?
            }
            Some(_) => {
                return Err(RepositoryError::Malformed(
                    "Quantity is not a String".to_string(),
                ))
            }
        };

        Ok(Product::new(product_id, name, brand, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, AttributeValue)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn complete_item_should_convert() {
        let item = item(&[
            (PRODUCT_ID, AttributeValue::S("P2".into())),
            (NAME, AttributeValue::S("car".into())),
            (BRAND, AttributeValue::S("Toyota".into())),
            (QUANTITY, AttributeValue::S("5".into())),
        ]);

        let product = Product::try_from(item).unwrap();

        assert_eq!(
            product,
            Product::new("P2".into(), "car".into(), "Toyota".into(), 5)
        );
    }

    #[test]
    fn item_with_only_a_key_should_convert_with_zero_values() {
        let product = Product::try_from(item(&[(PRODUCT_ID, AttributeValue::S("P1".into()))])).unwrap();

        assert_eq!(product, Product::new("P1".into(), "".into(), "".into(), 0));
    }

    #[test]
    fn numeric_quantity_should_be_tolerated() {
        let item = item(&[
            (PRODUCT_ID, AttributeValue::S("P1".into())),
            (QUANTITY, AttributeValue::N("12".into())),
        ]);

        assert_eq!(Product::try_from(item).unwrap().quantity, 12);
    }

    #[test]
    fn item_without_key_should_be_rejected() {
        let result = Product::try_from(item(&[(NAME, AttributeValue::S("car".into()))]));

        assert!(matches!(result, Err(RepositoryError::Malformed(_))));
    }

    #[test]
    fn unparseable_quantity_should_be_rejected() {
        let item = item(&[
            (PRODUCT_ID, AttributeValue::S("P1".into())),
            (QUANTITY, AttributeValue::S("many".into())),
        ]);

        assert!(matches!(
            Product::try_from(item),
            Err(RepositoryError::Malformed(_))
        ));
    }

    #[test]
    fn scan_page_should_keep_only_decodable_items() {
        let items = vec![
            item(&[
                (PRODUCT_ID, AttributeValue::S("P1".into())),
                (NAME, AttributeValue::S("bike".into())),
                (QUANTITY, AttributeValue::S("2".into())),
            ]),
            item(&[(NAME, AttributeValue::S("keyless".into()))]),
            item(&[
                (PRODUCT_ID, AttributeValue::S("P2".into())),
                (QUANTITY, AttributeValue::S("many".into())),
            ]),
            item(&[(PRODUCT_ID, AttributeValue::S("P3".into()))]),
        ];

        let products = decode_items(items);

        assert_eq!(
            products,
            vec![
                Product::new("P1".into(), "bike".into(), "".into(), 2),
                Product::new("P3".into(), "".into(), "".into(), 0),
            ]
        );
    }

    #[test]
    fn scan_should_continue_while_a_start_key_is_returned() {
        let last_key = item(&[(PRODUCT_ID, AttributeValue::S("P50".into()))]);

        assert_eq!(next_start_key(Some(last_key.clone())), Some(last_key));
    }

    #[test]
    fn scan_should_stop_without_a_start_key() {
        assert_eq!(next_start_key(None), None);
        assert_eq!(next_start_key(Some(HashMap::new())), None);
    }
}
