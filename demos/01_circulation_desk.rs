//! # Example 01: Circulation Desk
//!
//! A day at the circulation desk:
//! 1. Catalog a few titles
//! 2. Search the catalog by title, author and ISBN
//! 3. Borrow books and read the receipts back to the patron
//! 4. Watch the lending rules reject bad requests
//! 5. Return a book
//!
//! Run with: `cargo run -p libris-demos --example 01_circulation_desk`

use std::sync::Arc;

use libris_circulation::CirculationEngine;
use libris_core::SystemClock;
use libris_store::MemoryStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Example 01: Circulation Desk ===\n");

    // =========================================================================
    // Part 1: Catalog setup
    // =========================================================================

    println!("📚 Cataloging titles...\n");

    let store = Arc::new(MemoryStore::new());
    let engine = CirculationEngine::new(store, Arc::new(SystemClock));

    let dune = engine.add_book("Dune", "Frank Herbert", "9780441013593", 2)?;
    let messiah = engine.add_book("Dune Messiah", "Frank Herbert", "9780441015610", 1)?;
    let hyperion = engine.add_book("Hyperion", "Dan Simmons", "9780553283686", 1)?;

    for book in [&dune, &messiah, &hyperion] {
        println!(
            "  Added \"{}\" by {} ({} copies, id {})",
            book.title, book.author, book.total_copies, book.id
        );
    }

    // A second copy of an already-cataloged ISBN is rejected.
    match engine.add_book("Dune", "Frank Herbert", "9780441013593", 5) {
        Ok(_) => println!("  Unexpected: duplicate accepted"),
        Err(e) => println!("  ❌ Duplicate rejected: {e}"),
    }
    println!();

    // =========================================================================
    // Part 2: Catalog search
    // =========================================================================

    println!("🔍 Searching the catalog...\n");

    let by_title = engine.search("title", "dune")?;
    println!("  title \"dune\" matches {} entries:", by_title.len());
    for book in &by_title {
        println!("    - {} ({} available)", book.title, book.available_copies);
    }

    let by_author = engine.search("author", "Dan")?;
    println!("  author \"Dan\" matches: {}", by_author[0].title);

    let by_isbn = engine.search("isbn", "9780553283686")?;
    println!("  isbn 9780553283686 matches: {}", by_isbn[0].title);

    // Unknown search kinds come back empty rather than failing.
    let nothing = engine.search("genre", "science fiction")?;
    println!("  genre search matches {} entries", nothing.len());
    println!();

    // =========================================================================
    // Part 3: Borrowing
    // =========================================================================

    println!("🤝 Lending books...\n");

    let receipt = engine.borrow("123456", dune.id)?;
    println!("  {receipt}");

    let receipt = engine.borrow("123456", hyperion.id)?;
    println!("  {receipt}");
    println!();

    // =========================================================================
    // Part 4: Lending rules
    // =========================================================================

    println!("⚖️  Lending rules in action...\n");

    // Same patron, same book, twice. A copy is still on the shelf, so
    // the duplicate-loan rule is what fires.
    match engine.borrow("123456", dune.id) {
        Ok(_) => println!("  Unexpected: borrowed the same book twice"),
        Err(e) => println!("  ❌ {e}"),
    }

    // Another patron takes the last copy of Dune.
    let receipt = engine.borrow("654321", dune.id)?;
    println!("  {receipt}");

    // Now the title is exhausted.
    match engine.borrow("777777", dune.id) {
        Ok(_) => println!("  Unexpected: borrowed an exhausted title"),
        Err(e) => println!("  ❌ {e}"),
    }

    // Library cards carry six digits.
    match engine.borrow("12345", messiah.id) {
        Ok(_) => println!("  Unexpected: malformed patron id accepted"),
        Err(e) => println!("  ❌ {e}"),
    }
    println!();

    // =========================================================================
    // Part 5: Returning
    // =========================================================================

    println!("📥 Taking returns...\n");

    let receipt = engine.return_book("654321", dune.id)?;
    println!("  {receipt}");

    // The copy is back on the shelf.
    let hits = engine.search("isbn", "9780441013593")?;
    println!("  \"{}\" now has {} available", hits[0].title, hits[0].available_copies);

    // Returning a book the patron never borrowed.
    match engine.return_book("654321", hyperion.id) {
        Ok(_) => println!("  Unexpected: returned a book that was never borrowed"),
        Err(e) => println!("  ❌ {e}"),
    }
    println!();

    println!("✅ Circulation desk example completed!");
    Ok(())
}
