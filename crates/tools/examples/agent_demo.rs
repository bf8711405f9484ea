//! Drive the agent tools end to end against a seeded in-memory catalog

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use car_agent_catalog::{CarSearchService, InMemoryCatalog};
use car_agent_config::load_settings;
use car_agent_core::{Car, CatalogRepository};
use car_agent_financing::FinancingEngine;
use car_agent_tools::{create_registry, ContentBlock, ToolExecutor, ToolOutput};

fn car(stock_id: &str, make: &str, model: &str, year: i32, km: i32, price: &str) -> Car {
    Car {
        id: Uuid::new_v4(),
        stock_id: stock_id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        km,
        price: price.parse::<Decimal>().unwrap_or_default(),
        version: Some("LE".to_string()),
        bluetooth: true,
        car_play: year >= 2019,
        length_mm: None,
        width_mm: None,
        height_mm: None,
    }
}

fn seed_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        car("STK-1001", "Toyota", "Corolla", 2020, 45_000, "250000.00"),
        car("STK-1002", "Toyota", "Yaris", 2019, 60_000, "180000.00"),
        car("STK-1003", "Honda", "Civic", 2021, 30_000, "310000.00"),
        car("STK-1004", "Volkswagen", "Golf", 2018, 80_000, "210000.00"),
        car("STK-1005", "Mercedes Benz", "C200", 2020, 50_000, "550000.00"),
        car("STK-1006", "Nissan", "Versa", 2022, 15_000, "265000.00"),
    ])
}

/// Pull the conversational `message` out of a tool's JSON payload
fn agent_message(output: &ToolOutput) -> String {
    output
        .content
        .iter()
        .map(|ContentBlock::Text { text }| {
            serde_json::from_str::<Value>(text)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| text.clone())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let settings = load_settings(None)?;

    let repo: Arc<dyn CatalogRepository> = Arc::new(seed_catalog());
    let search = Arc::new(CarSearchService::new(
        repo.clone(),
        settings.matching.clone(),
        settings.search.clone(),
    ));
    let engine = FinancingEngine::new(settings.financing.clone());
    let registry = create_registry(search, engine, repo);

    println!("Registered tools:");
    for schema in registry.list_tools() {
        println!("  {} - {}", schema.name, schema.description);
    }

    println!("\n--- Customer: \"do you have a toyta?\" ---");
    let output = registry
        .execute("search_cars", json!({"make": "toyta"}))
        .await?;
    println!("{}", agent_message(&output));

    println!("\n--- Customer: \"how would I pay for the Corolla?\" ---");
    let output = registry
        .execute("calculate_financing", json!({"stock_id": "STK-1001"}))
        .await?;
    println!("{}", agent_message(&output));

    println!("\n--- Customer: \"50k down over 4 years?\" ---");
    let output = registry
        .execute(
            "calculate_financing",
            json!({"car_price": 250000.0, "down_payment": 50000.0, "term_years": 4}),
        )
        .await?;
    println!("{}", agent_message(&output));

    println!("\n--- Customer: \"tell me about the vw golf\" ---");
    let output = registry
        .execute("get_car_details", json!({"reference": "vw golf"}))
        .await?;
    println!("{}", agent_message(&output));

    println!("\n--- Customer: \"any ferraris?\" ---");
    let output = registry
        .execute("search_cars", json!({"make": "ferrari"}))
        .await?;
    println!("{}", agent_message(&output));

    println!("\n--- Customer: \"can I pay over 10 years?\" ---");
    match registry
        .execute(
            "calculate_financing",
            json!({"car_price": 250000.0, "term_years": 10}),
        )
        .await
    {
        Ok(output) => println!("{}", agent_message(&output)),
        Err(err) => println!("(rejected: {})", err),
    }

    Ok(())
}
