//! Automated bank/book verification example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{
    EngineConfig, Reconciler, TransactionRecord, TransactionSide,
};
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Reconciliation Core - Auto Verification Example\n");

    let storage = MemoryStorage::new();
    let mut reconciler = Reconciler::new(storage);

    // 1. Load the bank statement side
    println!("🏦 Loading bank statement records...");
    let bank_records = [
        ("bank-001", "1500.00", (2024, 1, 10), "PAYROLL RUN JANUARY"),
        ("bank-002", "250.00", (2024, 1, 15), "OFFICE SUPPLIES INC"),
        ("bank-003", "80.00", (2024, 1, 20), "AMAZON WEB SERVICES"),
        ("bank-004", "999.99", (2024, 1, 25), "UNKNOWN WIRE TRANSFER"),
    ];
    for (id, amount, (y, m, d), description) in bank_records {
        reconciler
            .add_record(TransactionRecord::new(
                id.to_string(),
                TransactionSide::Bank,
                BigDecimal::from_str(amount)?,
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                description.to_string(),
                "Chase_Jan_2024.csv".to_string(),
            ))
            .await?;
        println!("  ✓ {id}: {description} (${amount})");
    }

    // 2. Load the book side
    println!("\n📒 Loading general ledger records...");
    let book_records = [
        ("book-001", "1500.00", (2024, 1, 10), "Payroll run January"),
        ("book-002", "250.00", (2024, 1, 12), "Office supplies"),
        ("book-003", "80.00", (2024, 1, 19), "Amazon Web Svcs"),
    ];
    for (id, amount, (y, m, d), description) in book_records {
        reconciler
            .add_record(TransactionRecord::new(
                id.to_string(),
                TransactionSide::Book,
                BigDecimal::from_str(amount)?,
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                description.to_string(),
                "GL_2024.xlsx".to_string(),
            ))
            .await?;
        println!("  ✓ {id}: {description} (${amount})");
    }

    // 3. Run the tiered matcher
    println!("\n⚙️  Running auto verification...\n");
    let outcome = reconciler
        .run_auto_verification(&EngineConfig::default())
        .await?;

    for m in &outcome.result.matches {
        println!(
            "  ✓ {} ↔ {} [{:?}] confidence {:.2}",
            m.bank_id, m.book_id, m.match_type, m.confidence
        );
    }
    for r in &outcome.result.unmatched_bank {
        println!("  ✗ {} unmatched: {}", r.id, r.description);
    }

    // 4. Summary for the dashboard
    let summary = reconciler.summary().await?;
    println!(
        "\n📊 Verified {}/{} bank records ({}% match rate)",
        summary.matched, summary.bank_total, summary.match_rate_percent
    );

    Ok(())
}
