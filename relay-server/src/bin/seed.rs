//! Insert a demo PENDING print job
//!
//! Usage: `seed [printer-mac]`
//!
//! Writes one pending job into the store at `STORE_PATH` so a polling
//! printer (or curl) has something to pick up. The record matches the
//! upstream order system's shape, double-encoded `order` included.

use anyhow::Context;
use relay_server::jobs::JobKey;
use relay_server::store::{JobStore, RedbJobStore};
use relay_server::{Config, PrinterIdentity};

fn sample_order() -> serde_json::Value {
    serde_json::json!({
        "placementTime": "01/15 6:42 PM",
        "guestFirstName": "Dana",
        "guestLastName": "Whitman",
        "guestPhone": "(555) 010-7733",
        "orderNumber": 7,
        "isASAP": true,
        "estimatedCompletionTime": "7:15 PM",
        "orderType": "DELIVERY",
        "deliveryAddress": "88 Harbor Way",
        "suiteAptFloor": "Apt 2B",
        "deliveryDetails": "Ring twice",
        "orderItems": [{
            "quantity": 2,
            "food": {"name": "Margherita Pizza"},
            "foodSize": {"name": "Large"},
            "optionsGroupedByAddOn": [{
                "addOnName": "Toppings",
                "optionsGroupedByOptionSize": [{
                    "optionSizeName": "Left Half",
                    "options": [{"name": "Mushrooms"}]
                }],
                "options": [{"name": "Olives"}]
            }],
            "total": 25.98
        }],
        "subTotal": 25.98,
        "tax": 2.27,
        "deliveryFee": 4.99,
        "tip": 5.0,
        "total": 38.24
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    relay_server::init_logger();

    let config = Config::from_env();

    let mac = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0011223344556677".to_string());
    let printer = PrinterIdentity::new(mac);

    let store = RedbJobStore::open(&config.store_path)
        .with_context(|| format!("opening store at {}", config.store_path))?;

    // The upstream writes {status, order} with order as a JSON string
    let record = serde_json::json!({
        "status": "PENDING",
        "order": sample_order().to_string(),
    });

    let key = JobKey::new(&printer, &uuid::Uuid::new_v4().to_string());
    store.put(key.as_str(), &record.to_string(), None).await?;

    println!("Seeded pending job {}", key);
    println!(
        "Poll it:  curl -X POST -H 'x-star-mac: {}' http://localhost:{}/print",
        printer, config.http_port
    );

    Ok(())
}
