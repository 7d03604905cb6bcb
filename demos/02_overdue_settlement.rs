//! # Example 02: Overdue Settlement
//!
//! The money side of the workflow, on a manually driven clock:
//! 1. Borrow two books and let them go overdue
//! 2. Assess tiered late fees (one loan capped, one not)
//! 3. Charge the fee to a card, surviving a declined attempt
//! 4. Refund a charge within the allowed bounds
//! 5. Print the patron status report as Markdown and CSV
//!
//! Run with: `cargo run -p libris-demos --example 02_overdue_settlement`

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use libris_circulation::CirculationEngine;
use libris_core::ManualClock;
use libris_payments::{MockBehavior, MockGateway, PaymentProcessor};
use libris_reports::{CsvExporter, MarkdownExporter, ReportAssembler, ReportExporter};
use libris_store::MemoryStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Example 02: Overdue Settlement ===\n");

    // =========================================================================
    // Part 1: Borrow on March 1st
    // =========================================================================

    println!("📚 Setting the scene...\n");

    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
    ));
    let engine = CirculationEngine::new(store.clone(), clock.clone());

    let dune = engine.add_book("Dune", "Frank Herbert", "9780441013593", 1)?;
    let hobbit = engine.add_book("The Hobbit", "J.R.R. Tolkien", "9780547928227", 1)?;

    println!("  {}", engine.borrow("123456", dune.id)?);
    println!("  {}", engine.borrow("123456", hobbit.id)?);
    println!();

    // =========================================================================
    // Part 2: Time passes
    // =========================================================================

    println!("🕰️  Fast-forward to March 25th...\n");

    clock.advance_days(24);
    println!("  {}", engine.return_book("123456", dune.id)?);
    println!("  The Hobbit stays out.\n");

    println!("🕰️  Fast-forward again to April 4th...\n");
    clock.advance_days(10);

    // =========================================================================
    // Part 3: Fee assessment
    // =========================================================================

    println!("💰 Assessing late fees...\n");

    // Dune came back ten days late; its fee is frozen at the return date.
    let dune_fee = engine.assess_late_fee("123456", dune.id)?;
    println!(
        "  Dune: {} days overdue, {} owed ({})",
        dune_fee.days_overdue, dune_fee.amount, dune_fee.status
    );

    // The Hobbit is twenty days overdue and has hit the cap.
    let hobbit_fee = engine.assess_late_fee("123456", hobbit.id)?;
    println!(
        "  The Hobbit: {} days overdue, {} owed ({})",
        hobbit_fee.days_overdue, hobbit_fee.amount, hobbit_fee.status
    );
    println!();

    // =========================================================================
    // Part 4: Charging the card
    // =========================================================================

    println!("💳 Charging late fees...\n");

    let processor = PaymentProcessor::new(store.clone(), clock.clone());
    let gateway = MockGateway::declining("insufficient funds");

    // First attempt bounces.
    match processor.charge_late_fees("123456", dune.id, &gateway) {
        Ok(_) => println!("  Unexpected: declined charge went through"),
        Err(e) => println!("  ❌ {e}"),
    }

    // The patron swaps cards and tries again.
    gateway.set_behavior(MockBehavior::Approve);
    let payment = processor.charge_late_fees("123456", dune.id, &gateway)?;
    println!(
        "  💵 Charged {} for {} days overdue ({})",
        payment.amount, payment.days_overdue, payment.transaction_id
    );
    println!("  Gateway says: {}", payment.message);
    println!();

    // =========================================================================
    // Part 5: Refunds
    // =========================================================================

    println!("↩️  Processing a refund...\n");

    // Refunds above the per-loan cap can never be legitimate.
    match processor.refund_late_fees(payment.transaction_id.as_str(), dec!(20.00), &gateway) {
        Ok(_) => println!("  Unexpected: oversized refund accepted"),
        Err(e) => println!("  ❌ {e}"),
    }

    // Transaction ids from another processor are rejected up front.
    match processor.refund_late_fees("ch_9f2a41", dec!(6.50), &gateway) {
        Ok(_) => println!("  Unexpected: foreign transaction id accepted"),
        Err(e) => println!("  ❌ {e}"),
    }

    let refund = processor.refund_late_fees(payment.transaction_id.as_str(), dec!(6.50), &gateway)?;
    println!("  ✔️  {}", refund.message);
    println!();

    // =========================================================================
    // Part 6: Patron status report
    // =========================================================================

    println!("📄 Patron status report...\n");

    let assembler = ReportAssembler::new(store, clock);
    let report = assembler.patron_status("123456")?;

    println!("{}", MarkdownExporter::new().export(&report));
    println!("--- CSV ---");
    println!("{}", CsvExporter::new().export(&report));

    println!("✅ Overdue settlement example completed!");
    Ok(())
}
