//! Plain-text tables for the terminal.

use cabinet_core::cutting_list::{CuttingList, CuttingSummary};
use cabinet_core::export::fixed;
use cabinet_core::Ledger;

const RULE: &str = "═══════════════════════════════════════════════════════════════════════════";

pub fn print_ledger(ledger: &Ledger, currency: Option<&str>) {
    let symbol = currency.unwrap_or("");
    let inputs = ledger.inputs();

    println!("{}", RULE);
    println!("  COMPONENT BREAKDOWN");
    println!("{}", RULE);
    println!(
        "  H = {} mm   W = {} mm   D = {} mm   @ {}{:.2}/m²{}",
        inputs.height,
        inputs.width,
        inputs.depth,
        symbol,
        ledger.price_per_sq_m(),
        if ledger.is_edited() { "   (edited)" } else { "" }
    );
    println!();
    println!(
        "  {:<10} {:<18} {:>11} {:>11} {:>10} {:>10}",
        "Component", "Formula", "Height (mm)", "Width (mm)", "Area (m²)", "Price"
    );
    for c in ledger.components() {
        println!(
            "  {:<10} {:<18} {:>11} {:>11} {:>10} {:>10}",
            c.name,
            c.formula_label,
            fixed(c.height, 2),
            fixed(c.width, 2),
            fixed(c.area, 4),
            format!("{}{}", symbol, fixed(c.price, 2))
        );
    }
    println!();
    println!(
        "  {:<10} {:<18} {:>11} {:>11} {:>10} {:>10}",
        "Total",
        "",
        "",
        "",
        fixed(ledger.total_area(), 4),
        format!("{}{}", symbol, fixed(ledger.total_price(), 2))
    );
    println!("{}", RULE);
}

pub fn print_cutting_list(list: &CuttingList, summary: &CuttingSummary) {
    println!("{}", RULE);
    println!("  CUTTING LIST");
    println!("{}", RULE);

    for (category, entries) in list.categories() {
        if entries.items.is_empty() {
            continue;
        }
        println!();
        println!(
            "  {}  ({} pieces, {} sizes, {:.2} m²)",
            category, entries.total_pieces, entries.unique_sizes, entries.total_area
        );
        for (n, item) in entries.items.iter().enumerate() {
            println!(
                "  {:>3}. {:<12} {:<12} ×{:<3} {:<10} {}",
                n + 1,
                item.part_id,
                item.dimensions,
                item.quantity,
                item.material_type,
                item.notes
            );
        }
    }

    println!();
    println!(
        "  Total: {} pieces in {} categories, {:.2} m²",
        summary.total_pieces, summary.categories, summary.total_area
    );
    println!("{}", RULE);
}
