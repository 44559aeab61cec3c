//! Catalog read commands.

use anyhow::Result;
use stock_catalog::catalog::{OrderReceipt, OrderRequest, Product};
use stock_catalog::search::ProductQuery;
use stock_observability::StructuredLogger;

use super::{OrderArgs, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{format_price, format_timestamp, status_badge};

const PRODUCT_WIDTHS: [usize; 5] = [5, 36, 20, 10, 7];

/// List products matching the filters.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args);
    ctx.output.debug(&format!(
        "Query: search='{}' category='{}' skip={} limit={}",
        query.search, query.category, query.skip, query.limit
    ));

    let spinner = ctx.output.spinner("Fetching products...");
    let result = ctx.catalog().list_products(&query).await;
    spinner.finish_and_clear();
    let page = result?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({} of {} matches)",
        page.len(),
        page.total
    ));
    if page.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "TITLE", "CATEGORY", "PRICE", "STOCK"], &PRODUCT_WIDTHS);
    for product in &page.products {
        let row = product_row(product);
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cells, &PRODUCT_WIDTHS);
    }

    if page.has_more() {
        ctx.output.info(&format!(
            "More results: --skip {}",
            page.skip + page.limit
        ));
    }
    Ok(())
}

/// Show one product.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching product...");
    let result = ctx.catalog().get_product(&args.id).await;
    spinner.finish_and_clear();
    let product = result?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("category", &product.category);
    if let Some(brand) = &product.brand {
        ctx.output.kv("brand", brand);
    }
    ctx.output.kv("price", &format_price(product.price));
    ctx.output.kv("stock", &product.stock.to_string());
    ctx.output.kv("status", &status_badge(product.status()));
    if let Some(rating) = product.rating {
        ctx.output.kv("rating", &format!("{:.2}", rating));
    }
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
    Ok(())
}

/// List categories.
pub async fn categories(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching categories...");
    let result = ctx.catalog().categories().await;
    spinner.finish_and_clear();
    let response = result?;

    if ctx.output.is_json() {
        ctx.output.json(&response);
        return Ok(());
    }

    ctx.output
        .header(&format!("Categories ({})", response.categories.len()));
    for category in &response.categories {
        ctx.output.list_item(category);
    }
    Ok(())
}

/// Show availability status counts and percentages.
pub async fn metrics(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Computing availability metrics...");
    let result = ctx.catalog().availability_metrics().await;
    spinner.finish_and_clear();
    let response = result?;

    if ctx.output.is_json() {
        ctx.output.json(&response);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Availability ({} products)",
        response.total_products
    ));
    let widths = [16, 8, 8];
    ctx.output.table_row(&["STATUS", "COUNT", "SHARE"], &widths);
    for (status, metric) in &response.availability_status {
        ctx.output.table_row(
            &[
                status.as_str(),
                metric.count.to_string().as_str(),
                format!("{:.2}%", metric.percentage).as_str(),
            ],
            &widths,
        );
    }
    ctx.output
        .kv("updated", &format_timestamp(&response.last_updated));
    Ok(())
}

/// List low-stock products, lowest stock first.
pub async fn low_stock(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching low-stock products...");
    let result = ctx.catalog().low_stock().await;
    spinner.finish_and_clear();
    let response = result?;

    if ctx.output.is_json() {
        ctx.output.json(&response);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Low stock ({} products)",
        response.total_low_stock_products
    ));
    if response.products.is_empty() {
        ctx.output.success("Nothing is running low");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "TITLE", "CATEGORY", "PRICE", "STOCK"], &PRODUCT_WIDTHS);
    for item in &response.products {
        ctx.output.table_row(
            &[
                item.id.to_string().as_str(),
                item.title.as_str(),
                item.category.as_str(),
                format_price(item.price).as_str(),
                item.stock.to_string().as_str(),
            ],
            &PRODUCT_WIDTHS,
        );
    }
    ctx.output
        .kv("updated", &format_timestamp(&response.last_updated));
    Ok(())
}

/// Log a quick order for a product.
pub async fn order(args: OrderArgs, ctx: &Context) -> Result<()> {
    let request = OrderRequest {
        quantity: Some(args.quantity),
    };

    let spinner = ctx.output.spinner("Logging order...");
    let result = ctx.catalog().quick_order(&args.id, &request).await;
    spinner.finish_and_clear();
    let receipt = result?;
    log_receipt(&ctx.logger(), &receipt);

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Logged order for {} x {} (product {})",
        receipt.quantity, receipt.title, receipt.product_id
    ));
    ctx.output
        .kv("logged at", &format_timestamp(&receipt.logged_at));
    Ok(())
}

fn log_receipt(logger: &StructuredLogger, receipt: &OrderReceipt) {
    logger
        .info_builder("quick order logged")
        .field_i64("product_id", receipt.product_id as i64)
        .field("title", receipt.title.as_str())
        .field_i64("quantity", i64::from(receipt.quantity))
        .field("logged_at", receipt.logged_at.as_str())
        .emit();
}

fn build_query(args: &ProductsArgs) -> ProductQuery {
    let mut query = ProductQuery::new().with_pagination(args.skip, args.limit);
    if let Some(search) = &args.search {
        query = query.with_search(search.trim());
    }
    if let Some(category) = &args.category {
        query = query.with_category(category.trim());
    }
    if args.all {
        query = query.unpaginated();
    }
    query
}

fn product_row(product: &Product) -> [String; 5] {
    [
        product.id.to_string(),
        product.title.clone(),
        product.category.clone(),
        format_price(product.price),
        product.stock.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_observability::{LogSink, RequestId};

    fn args() -> ProductsArgs {
        ProductsArgs {
            search: None,
            category: None,
            skip: 0,
            limit: 30,
            all: false,
        }
    }

    #[test]
    fn test_build_query_defaults() {
        assert_eq!(build_query(&args()), ProductQuery::new());
    }

    #[test]
    fn test_build_query_filters() {
        let query = build_query(&ProductsArgs {
            search: Some(" phone ".into()),
            category: Some("smartphones".into()),
            skip: 10,
            ..args()
        });
        assert_eq!(query.search, "phone");
        assert_eq!(query.category, "smartphones");
        assert_eq!(query.skip, 10);
        assert_eq!(query.limit, 30);
    }

    #[test]
    fn test_build_query_all() {
        let query = build_query(&ProductsArgs {
            skip: 5,
            all: true,
            ..args()
        });
        assert_eq!(query.skip, 5);
        assert_eq!(query.limit, 0);
    }

    #[test]
    fn test_order_is_logged() {
        let (sink, lines) = LogSink::memory();
        let logger = StructuredLogger::new(RequestId::from_string("req-cli"))
            .with_workload("stock-cli")
            .with_sink(sink);
        let product = Product::new(7, "Lamp", "home-decoration");
        let receipt = OrderReceipt::logged(&product, 3, "2024-05-01T09:00:00.000Z".into());

        log_receipt(&logger, &receipt);

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        let entry: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(entry["message"], "quick order logged");
        assert_eq!(entry["workload"], "stock-cli");
        assert_eq!(entry["product_id"], 7);
        assert_eq!(entry["quantity"], 3);
        assert_eq!(entry["logged_at"], "2024-05-01T09:00:00.000Z");
    }

    #[test]
    fn test_product_row() {
        let product = Product::new(7, "Lamp", "home-decoration")
            .with_price(12.5)
            .with_stock(3);
        assert_eq!(
            product_row(&product),
            ["7", "Lamp", "home-decoration", "$12.50", "3"]
        );
    }
}
