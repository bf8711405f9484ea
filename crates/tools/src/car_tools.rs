//! Car Agent Tools
//!
//! The tools the sales agent calls during a conversation: catalog search,
//! financing quotes, and single-car details. Every tool answers with
//! structured JSON plus a ready-to-send `message` for the chat channel.

use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;

use car_agent_catalog::{CarQuery, CarSearchService};
use car_agent_core::{Car, CatalogRepository};
use car_agent_financing::{FinancingEngine, FinancingSummary};

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

/// Results per search when the agent does not ask for a count
const DEFAULT_SEARCH_RESULTS: usize = 5;

/// Read an optional money parameter as `Decimal`
fn money_param(input: &Value, name: &str) -> Result<Option<Decimal>, ToolError> {
    match input.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let number = value
                .as_f64()
                .ok_or_else(|| ToolError::invalid_params(format!("{} must be a number", name)))?;
            Decimal::from_f64(number)
                .map(Some)
                .ok_or_else(|| ToolError::invalid_params(format!("{} is not a valid amount", name)))
        }
    }
}

fn car_summary(car: &Car) -> Value {
    json!({
        "stock_id": car.stock_id,
        "make": car.make,
        "model": car.model,
        "year": car.year,
        "price": car.price,
        "km": car.km,
    })
}

/// Search the catalog with fuzzy make/model resolution
pub struct SearchCarsTool {
    search: Arc<CarSearchService>,
}

impl SearchCarsTool {
    pub fn new(search: Arc<CarSearchService>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchCarsTool {
    fn name(&self) -> &str {
        "search_cars"
    }

    fn description(&self) -> &str {
        "Search the car catalog by make, model, year and price. \
         Misspelled brands and models are corrected automatically."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "make",
                    PropertySchema::string("Car make, e.g. Toyota, Honda, BMW"),
                    false,
                )
                .property(
                    "model",
                    PropertySchema::string("Car model, e.g. Corolla, Civic, X5"),
                    false,
                )
                .property("year_min", PropertySchema::integer("Minimum model year"), false)
                .property("year_max", PropertySchema::integer("Maximum model year"), false)
                .property("price_min", PropertySchema::number("Minimum price in pesos"), false)
                .property("price_max", PropertySchema::number("Maximum price in pesos"), false)
                .property(
                    "limit",
                    PropertySchema::integer("Maximum number of results")
                        .with_default(json!(DEFAULT_SEARCH_RESULTS)),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let query = CarQuery {
            make: input.get("make").and_then(|v| v.as_str()).map(str::to_string),
            model: input.get("model").and_then(|v| v.as_str()).map(str::to_string),
            year_min: input.get("year_min").and_then(|v| v.as_i64()).map(|y| y as i32),
            year_max: input.get("year_max").and_then(|v| v.as_i64()).map(|y| y as i32),
            price_min: money_param(&input, "price_min")?,
            price_max: money_param(&input, "price_max")?,
            limit: Some(
                input
                    .get("limit")
                    .and_then(|v| v.as_u64())
                    .map(|l| l as usize)
                    .unwrap_or(DEFAULT_SEARCH_RESULTS),
            ),
            ..CarQuery::default()
        };

        let cars = self
            .search
            .search(&query)
            .await
            .map_err(|e| ToolError::execution(e.to_string()))?;

        if cars.is_empty() {
            return Ok(ToolOutput::json(json!({
                "count": 0,
                "cars": [],
                "message": "No cars matched those preferences. Try different criteria.",
            })));
        }

        let mut lines = vec!["I found these available cars:".to_string()];
        for (i, car) in cars.iter().enumerate() {
            lines.push(format!(
                "{}. {} {} {} (Stock ID: {}, Price: ${}, KM: {})",
                i + 1,
                car.make,
                car.model,
                car.year,
                car.stock_id,
                car.price,
                car.km
            ));
        }

        let result = json!({
            "count": cars.len(),
            "cars": cars.iter().map(car_summary).collect::<Vec<_>>(),
            "message": lines.join("\n"),
        });

        Ok(ToolOutput::json(result))
    }
}

/// Quote financing plans for a car price or a catalog car
pub struct CalculateFinancingTool {
    engine: FinancingEngine,
    repo: Arc<dyn CatalogRepository>,
}

impl CalculateFinancingTool {
    pub fn new(engine: FinancingEngine, repo: Arc<dyn CatalogRepository>) -> Self {
        Self { engine, repo }
    }

    fn single_plan(
        &self,
        car_price: Decimal,
        down_payment: Option<Decimal>,
        term_years: i64,
    ) -> Result<ToolOutput, ToolError> {
        let down_payment =
            down_payment.unwrap_or_else(|| self.engine.config().default_down_payment(car_price));

        let plan = self
            .engine
            .calculate_financing_plan(car_price, down_payment, term_years, None)
            .map_err(|e| ToolError::invalid_params(e.to_string()))?;

        let financed_amount = car_price - down_payment;
        let message = format!(
            "Over {} months ({} years) the monthly payment is ${} (total ${}, interest ${}).",
            plan.term_months,
            plan.term_years,
            plan.monthly_payment,
            plan.total_amount,
            plan.interest_amount
        );

        Ok(ToolOutput::json(json!({
            "car_price": car_price,
            "down_payment": down_payment,
            "financed_amount": financed_amount,
            "plan": plan,
            "message": message,
        })))
    }

    fn all_plans(
        &self,
        car_price: Decimal,
        down_payment: Option<Decimal>,
    ) -> Result<ToolOutput, ToolError> {
        let summary = self
            .engine
            .calculate_all_plans(car_price, down_payment, None)
            .map_err(|e| ToolError::invalid_params(e.to_string()))?;

        let message = summary_message(&summary);

        Ok(ToolOutput::json(json!({
            "car_price": summary.car_price,
            "down_payment": summary.down_payment,
            "financed_amount": summary.financed_amount,
            "annual_interest_rate": summary.annual_interest_rate,
            "plans": summary.plans,
            "message": message,
        })))
    }
}

#[async_trait]
impl Tool for CalculateFinancingTool {
    fn name(&self) -> &str {
        "calculate_financing"
    }

    fn description(&self) -> &str {
        "Calculate car financing plans. Available terms are 3, 4, 5 or 6 \
         years; without a term, all four are quoted."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "car_price",
                    PropertySchema::number("Car price in pesos (or pass stock_id)"),
                    false,
                )
                .property(
                    "stock_id",
                    PropertySchema::string("Stock ID of the car to price"),
                    false,
                )
                .property(
                    "down_payment",
                    PropertySchema::number("Down payment in pesos (default: 10% of the price)"),
                    false,
                )
                .property(
                    "term_years",
                    PropertySchema::integer("Loan term in years: 3, 4, 5 or 6"),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let car_price = match money_param(&input, "car_price")? {
            Some(price) => price,
            None => {
                let stock_id = input
                    .get("stock_id")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        ToolError::invalid_params("car_price or stock_id is required")
                    })?;
                let car = self
                    .repo
                    .get_by_stock_id(stock_id)
                    .await
                    .map_err(|e| ToolError::execution(e.to_string()))?
                    .ok_or_else(|| {
                        ToolError::not_found(format!("No car found with stock ID {}", stock_id))
                    })?;
                car.price
            }
        };

        let down_payment = money_param(&input, "down_payment")?;

        match input.get("term_years").and_then(|v| v.as_i64()) {
            Some(term_years) => self.single_plan(car_price, down_payment, term_years),
            None => self.all_plans(car_price, down_payment),
        }
    }
}

fn summary_message(summary: &FinancingSummary) -> String {
    let rate_percent = (summary.annual_interest_rate * Decimal::from(100)).normalize();

    let mut lines = vec![
        "Available financing plans:".to_string(),
        format!("- Car price: ${}", summary.car_price),
        format!("- Down payment: ${}", summary.down_payment),
        format!("- Amount financed: ${}", summary.financed_amount),
        format!("- Interest rate: {}% annual", rate_percent),
        String::new(),
        "Monthly payment options (available terms: 3, 4, 5 or 6 years):".to_string(),
    ];

    for plan in &summary.plans {
        lines.push(format!(
            "- {} months ({} years): ${}/month (Total: ${})",
            plan.term_months, plan.term_years, plan.monthly_payment, plan.total_amount
        ));
    }

    lines.join("\n")
}

/// Full details for one car, by stock ID or free-text reference
pub struct GetCarDetailsTool {
    search: Arc<CarSearchService>,
}

impl GetCarDetailsTool {
    pub fn new(search: Arc<CarSearchService>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for GetCarDetailsTool {
    fn name(&self) -> &str {
        "get_car_details"
    }

    fn description(&self) -> &str {
        "Get full details for one car, by its stock ID or a reference like \
         'toyota corolla'."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property("stock_id", PropertySchema::string("Stock ID of the car"), false)
                .property(
                    "reference",
                    PropertySchema::string("Free-text reference, e.g. 'toyota corolla'"),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let stock_id = input.get("stock_id").and_then(|v| v.as_str());
        let reference = input.get("reference").and_then(|v| v.as_str());

        let lookup = stock_id
            .or(reference)
            .ok_or_else(|| ToolError::invalid_params("stock_id or reference is required"))?;

        let car = self
            .search
            .find_by_reference(lookup)
            .await
            .map_err(|e| ToolError::execution(e.to_string()))?
            .ok_or_else(|| {
                ToolError::not_found(format!(
                    "No car found for \"{}\". Provide a stock ID or search the catalog first.",
                    lookup
                ))
            })?;

        let message = detail_message(&car);

        Ok(ToolOutput::json(json!({
            "car": car,
            "message": message,
        })))
    }
}

fn detail_message(car: &Car) -> String {
    format!(
        "Car details:\n- Make: {}\n- Model: {}\n- Year: {}\n- Price: ${}\n\
         - Mileage: {} km\n- Version: {}\n- Stock ID: {}\n- Bluetooth: {}\n- CarPlay: {}",
        car.make,
        car.model,
        car.year,
        car.price,
        car.km,
        car.version.as_deref().unwrap_or("N/A"),
        car.stock_id,
        if car.bluetooth { "Yes" } else { "No" },
        if car.car_play { "Yes" } else { "No" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::ContentBlock;
    use car_agent_catalog::InMemoryCatalog;
    use car_agent_config::{FinancingConfig, MatchingConfig, SearchConfig};
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn car(stock_id: &str, make: &str, model: &str, year: i32, km: i32, price: &str) -> Car {
        Car {
            id: Uuid::new_v4(),
            stock_id: stock_id.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            km,
            price: dec(price),
            version: Some("LE".to_string()),
            bluetooth: true,
            car_play: false,
            length_mm: None,
            width_mm: None,
            height_mm: None,
        }
    }

    fn sample_repo() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::new(vec![
            car("STK-1", "Toyota", "Corolla", 2020, 45_000, "250000.00"),
            car("STK-2", "Toyota", "Yaris", 2019, 60_000, "180000.00"),
            car("STK-3", "Volkswagen", "Golf", 2018, 80_000, "210000.00"),
        ]))
    }

    fn sample_search(repo: Arc<InMemoryCatalog>) -> Arc<CarSearchService> {
        Arc::new(CarSearchService::new(
            repo,
            MatchingConfig::default(),
            SearchConfig::default(),
        ))
    }

    fn output_json(output: &ToolOutput) -> Value {
        let ContentBlock::Text { text } = &output.content[0];
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_search_cars_corrects_make() {
        let tool = SearchCarsTool::new(sample_search(sample_repo()));
        let output = tool.execute(json!({"make": "toyta"})).await.unwrap();
        assert!(!output.is_error);

        let value = output_json(&output);
        assert_eq!(value["count"], 2);
        assert_eq!(value["cars"][0]["make"], "Toyota");
        assert!(value["message"]
            .as_str()
            .unwrap()
            .starts_with("I found these available cars:"));
    }

    #[tokio::test]
    async fn test_search_cars_no_results() {
        let tool = SearchCarsTool::new(sample_search(sample_repo()));
        let output = tool.execute(json!({"make": "ferrari"})).await.unwrap();

        let value = output_json(&output);
        assert_eq!(value["count"], 0);
        assert!(value["message"].as_str().unwrap().contains("No cars matched"));
    }

    #[tokio::test]
    async fn test_search_cars_price_bound() {
        let tool = SearchCarsTool::new(sample_search(sample_repo()));
        let output = tool
            .execute(json!({"price_max": 200000.0}))
            .await
            .unwrap();

        let value = output_json(&output);
        assert_eq!(value["count"], 1);
        assert_eq!(value["cars"][0]["stock_id"], "STK-2");
    }

    #[tokio::test]
    async fn test_calculate_financing_all_terms() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        let output = tool
            .execute(json!({"car_price": 180000.0, "down_payment": 20000.0}))
            .await
            .unwrap();

        let value = output_json(&output);
        assert_eq!(value["financed_amount"], "160000");

        let plans = value["plans"].as_array().unwrap();
        assert_eq!(plans.len(), 4);
        assert_eq!(plans[0]["term_years"], 3);
        assert_eq!(plans[0]["term_months"], 36);
        assert_eq!(plans[0]["monthly_payment"], "5162.75");
        assert_eq!(plans[0]["total_amount"], "185859.00");
        assert_eq!(plans[0]["interest_amount"], "25859.00");

        assert!(value["message"]
            .as_str()
            .unwrap()
            .contains("36 months (3 years): $5162.75/month"));
    }

    #[tokio::test]
    async fn test_calculate_financing_single_term() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        let output = tool
            .execute(json!({
                "car_price": 180000.0,
                "down_payment": 20000.0,
                "term_years": 3
            }))
            .await
            .unwrap();

        let value = output_json(&output);
        assert_eq!(value["plan"]["monthly_payment"], "5162.75");
        assert_eq!(value["plan"]["term_months"], 36);
    }

    #[tokio::test]
    async fn test_calculate_financing_from_stock_id() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        // STK-1 costs 250000.00; the default down payment is 10%
        let output = tool.execute(json!({"stock_id": "STK-1"})).await.unwrap();

        let value = output_json(&output);
        assert_eq!(value["car_price"], "250000.00");
        assert_eq!(value["down_payment"], "25000.00");
        assert_eq!(value["financed_amount"], "225000.00");

        let plans = value["plans"].as_array().unwrap();
        assert_eq!(plans[1]["term_years"], 4);
        assert_eq!(plans[1]["monthly_payment"], "5706.58");
    }

    #[tokio::test]
    async fn test_calculate_financing_unknown_stock_id() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        let err = tool
            .execute(json!({"stock_id": "STK-99"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_calculate_financing_invalid_term() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        let err = tool
            .execute(json!({"car_price": 200000.0, "term_years": 7}))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid parameters: term must be 3, 4, 5, or 6 years"
        );
    }

    #[tokio::test]
    async fn test_calculate_financing_down_payment_too_high() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        let err = tool
            .execute(json!({"car_price": 200000.0, "down_payment": 200000.0}))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid parameters: down payment cannot be greater than or equal to vehicle price"
        );
    }

    #[tokio::test]
    async fn test_calculate_financing_requires_price_or_stock() {
        let tool = CalculateFinancingTool::new(
            FinancingEngine::new(FinancingConfig::default()),
            sample_repo(),
        );
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_get_car_details_by_stock_id() {
        let tool = GetCarDetailsTool::new(sample_search(sample_repo()));
        let output = tool.execute(json!({"stock_id": "STK-1"})).await.unwrap();

        let value = output_json(&output);
        assert_eq!(value["car"]["model"], "Corolla");
        let message = value["message"].as_str().unwrap();
        assert!(message.contains("- Stock ID: STK-1"));
        assert!(message.contains("- Bluetooth: Yes"));
        assert!(message.contains("- CarPlay: No"));
    }

    #[tokio::test]
    async fn test_get_car_details_by_reference() {
        let tool = GetCarDetailsTool::new(sample_search(sample_repo()));
        let output = tool
            .execute(json!({"reference": "vw golf"}))
            .await
            .unwrap();

        let value = output_json(&output);
        assert_eq!(value["car"]["stock_id"], "STK-3");
    }

    #[tokio::test]
    async fn test_get_car_details_not_found() {
        let tool = GetCarDetailsTool::new(sample_search(sample_repo()));
        let err = tool.execute(json!({"stock_id": "STK-99"})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_car_details_requires_a_lookup() {
        let tool = GetCarDetailsTool::new(sample_search(sample_repo()));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }
}
