//! DummyJSON-backed catalog source.

use async_trait::async_trait;
use serde::Deserialize;
use stock_catalog::catalog::{CatalogSnapshot, Product};
use stock_catalog::{CatalogError, CatalogSource};

use crate::{FetchClient, FetchError, Response};

const PRODUCTS_PATH: &str = "/products";
const CATEGORY_LIST_PATH: &str = "/products/category-list";

/// The product list envelope. `limit=0` asks for every product at once.
#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    products: Vec<Product>,
    #[serde(default)]
    total: Option<u64>,
}

/// Category entries are plain slugs on `category-list` and objects on the
/// older `categories` endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryEntry {
    Slug(String),
    Object { slug: String },
}

impl CategoryEntry {
    fn into_slug(self) -> String {
        match self {
            CategoryEntry::Slug(slug) | CategoryEntry::Object { slug } => slug,
        }
    }
}

/// Reads the catalog from a DummyJSON-compatible products API.
///
/// Every call issues exactly one upstream request. Nothing is retried.
#[derive(Debug, Clone)]
pub struct DummyJsonCatalog {
    client: FetchClient,
}

impl DummyJsonCatalog {
    /// Wrap a client. Relative paths are resolved against its base URL.
    pub fn new(client: FetchClient) -> Self {
        Self {
            client: client.with_default_header("accept", "application/json"),
        }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, FetchError> {
        self.client
            .get(path)
            .query(query)
            .send()
            .await?
            .error_for_status()
    }
}

#[async_trait(?Send)]
impl CatalogSource for DummyJsonCatalog {
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError> {
        let response = self.get(PRODUCTS_PATH, &[("limit", "0")]).await?;
        Ok(parse_catalog(&response)?)
    }

    async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        let path = format!("{}/{}", PRODUCTS_PATH, id);
        let response = self.get(&path, &[]).await?;
        Ok(response.json::<Product>()?)
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let response = self.get(CATEGORY_LIST_PATH, &[]).await?;
        Ok(parse_categories(&response)?)
    }
}

fn parse_catalog(response: &Response) -> Result<CatalogSnapshot, FetchError> {
    let envelope: ProductsEnvelope = response.json()?;
    Ok(CatalogSnapshot {
        products: envelope.products,
        total: envelope.total,
    })
}

fn parse_categories(response: &Response) -> Result<Vec<String>, FetchError> {
    let entries: Vec<CategoryEntry> = response.json()?;
    Ok(entries.into_iter().map(CategoryEntry::into_slug).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ok(body: &str) -> Response {
        Response::new(200, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_parse_catalog() {
        let response = ok(r#"{
            "products": [
                {"id": 1, "title": "Essence Mascara", "category": "beauty", "price": 9.99,
                 "stock": 5, "availabilityStatus": "Low Stock"},
                {"id": 2, "title": "Eyeshadow Palette", "category": "beauty", "price": 19.99,
                 "stock": 44, "availabilityStatus": "In Stock"}
            ],
            "total": 194, "skip": 0, "limit": 0
        }"#);
        let snapshot = parse_catalog(&response).unwrap();
        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(snapshot.declared_total(), 194);
        assert!(snapshot.products[0].is_low_stock());
    }

    #[test]
    fn test_parse_catalog_without_total() {
        let response = ok(r#"{"products": [{"id": 1, "title": "A", "category": "x", "price": 1, "stock": 1}]}"#);
        let snapshot = parse_catalog(&response).unwrap();
        assert_eq!(snapshot.total, None);
        assert_eq!(snapshot.declared_total(), 1);
    }

    #[test]
    fn test_parse_catalog_rejects_other_shapes() {
        assert!(matches!(
            parse_catalog(&ok(r#"{"items": []}"#)),
            Err(FetchError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_categories() {
        let slugs = parse_categories(&ok(r#"["beauty", "fragrances", "groceries"]"#)).unwrap();
        assert_eq!(slugs, vec!["beauty", "fragrances", "groceries"]);

        let objects = parse_categories(&ok(
            r#"[{"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"}]"#,
        ))
        .unwrap();
        assert_eq!(objects, vec!["beauty"]);
    }

    #[test]
    fn test_missing_product_surfaces_not_found() {
        let response = Response::new(
            404,
            HashMap::new(),
            br#"{"message": "Product with id '999' not found"}"#.to_vec(),
        );
        let err: CatalogError = response.error_for_status().unwrap_err().into();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_accept_header_is_set() {
        let catalog = DummyJsonCatalog::new(FetchClient::new().with_base_url("https://dummyjson.com"));
        let req = catalog.client().get(PRODUCTS_PATH).query(&[("limit", "0")]);
        assert_eq!(req.request().headers["accept"], "application/json");
        assert_eq!(
            req.request().build_url().unwrap().as_str(),
            "https://dummyjson.com/products?limit=0"
        );
    }
}
