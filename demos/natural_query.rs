//! Ask a DuckDB database questions in plain language.
//!
//! Usage:
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --example natural_query -- database.db
//! ```

use anyhow::Context;
use nlsql::{logging, Config, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let db_path = std::env::args()
        .nth(1)
        .context("usage: natural_query <database.db>")?;
    let api_key = Config::openai_api_key()?;

    let mut session = Session::open(api_key, &db_path)
        .with_context(|| format!("opening {db_path}"))?;

    let questions = [
        "Show me all users who made a purchase in the last month",
        "What are the top 5 most viewed products?",
        "Calculate the average transaction amount by category",
    ];

    for question in questions {
        println!("\nNatural Language Query: {question}");
        match session.natural_query(question).await {
            Ok(result) => {
                println!("Results ({} rows):", result.row_count);
                println!("{}", serde_json::to_string_pretty(&result.to_json())?);
            }
            Err(e) => println!("Query failed: {e}"),
        }
    }

    session.close();
    Ok(())
}
