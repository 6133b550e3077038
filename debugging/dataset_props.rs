//! Fetch every catalogue document and print the field names of its first record,
//! to check the upstream export shape. Uses CATALOG_DATA_URL or CATALOG_DATA_DIR
//! from the environment (.env supported).

use anyhow::{Context, Result};
use cinefilter::config::DashboardConfig;
use cinefilter::loader::DATASETS;
use dotenvy::dotenv;
use serde_json::Value;

fn first_record(doc: &Value) -> Option<&Value> {
    match doc {
        Value::Array(rows) => rows.first(),
        Value::Object(map) => map
            .get("nodes")
            .and_then(|n| n.as_array())
            .and_then(|n| n.first()),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = DashboardConfig::from_env()?;
    let source = config.source();

    for name in DATASETS {
        println!("{}", name);
        let Some(bytes) = source.fetch(name).await? else {
            println!("  (no content)");
            continue;
        };
        let doc: Value =
            serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", name))?;
        match first_record(&doc).and_then(|r| r.as_object()) {
            Some(fields) => {
                for key in fields.keys() {
                    println!("  {}", key);
                }
            }
            None => println!("  (empty)"),
        }
    }

    Ok(())
}
