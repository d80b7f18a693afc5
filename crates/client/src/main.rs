use medistock_client::ApiClient;
use medistock_reports::inventory_summary;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    medistock_observability::init();

    let api_url = std::env::var("MEDISTOCK_API_URL").unwrap_or_else(|_| {
        tracing::warn!("MEDISTOCK_API_URL not set; using local dev default");
        "http://localhost:5000/api/v1".to_string()
    });

    let client = match std::env::var("MEDISTOCK_TOKEN") {
        Ok(token) => ApiClient::with_token(api_url, token),
        Err(_) => ApiClient::new(api_url),
    };

    let items = client.fetch_items().await?;
    let summary = inventory_summary(&items);

    println!(
        "{} items | {} units on hand | total value {}",
        summary.total_items, summary.total_quantity, summary.total_value
    );

    for item in items.iter().filter(|i| i.is_low_stock()) {
        println!(
            "LOW  {:<32} stock {:>5} (threshold {})",
            item.name(),
            item.total_stock(),
            item.low_stock_threshold()
        );
    }

    Ok(())
}
