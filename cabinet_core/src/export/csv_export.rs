//! CSV exports for the price ledger and the cutting list.
//!
//! Text fields are always quoted and numbers never are, which is what the
//! workshop spreadsheets expect. Records end in `\n`.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::cutting_list::CuttingList;
use crate::errors::{CabinetError, CabinetResult};
use crate::ledger::Ledger;

const LEDGER_HEADER: [&str; 5] = ["Component", "Formula", "Height (mm)", "Width (mm)", "Area (m²)"];

const CUTTING_LIST_HEADER: [&str; 8] = [
    "Category",
    "Part ID",
    "Dimensions",
    "Height (mm)",
    "Width (mm)",
    "Quantity",
    "Material",
    "Notes",
];

fn write_records<I, R>(out: &mut Vec<u8>, style: QuoteStyle, records: I) -> CabinetResult<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    for record in records {
        writer.write_record(record)?;
    }
    writer
        .flush()
        .map_err(|e| CabinetError::export_failed("csv", e.to_string()))
}

/// Largest magnitude below which every integer is an exact `f64`
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// `value` to `decimals` places. Exact ties round away from zero (`0.125`
/// reads `0.13`), and negative zero prints as zero.
pub fn fixed(value: f64, decimals: u32) -> String {
    let precision = decimals as usize;
    let value = if value == 0.0 { 0.0 } else { value };
    let half_steps = 2.0 * 10_u32.pow(decimals) as f64;
    let doubled = value * half_steps;
    let exact = value.mul_add(half_steps, -doubled) == 0.0;
    if exact && doubled.abs() < EXACT_INTEGER_LIMIT && doubled.fract() == 0.0 && doubled % 2.0 != 0.0 {
        let away = (doubled + doubled.signum()) / half_steps;
        return format!("{:.*}", precision, away);
    }
    format!("{:.*}", precision, value)
}

fn into_text(out: Vec<u8>) -> CabinetResult<String> {
    String::from_utf8(out).map_err(|e| CabinetError::export_failed("csv", e.to_string()))
}

/// Ledger as CSV with a plain `Price` column header.
///
/// ```text
/// Component,Formula,Height (mm),Width (mm),Area (m²),Price
/// "Gable","H × W",2100.00,600.00,1.2600,63.00
/// ...
///
/// Total,,,,3.2566,162.83
/// ```
pub fn ledger_to_csv(ledger: &Ledger) -> CabinetResult<String> {
    ledger_to_csv_with_currency(ledger, None)
}

/// Ledger as CSV; with a currency symbol the last header reads `Price (£)`.
pub fn ledger_to_csv_with_currency(ledger: &Ledger, currency: Option<&str>) -> CabinetResult<String> {
    let price_header = match currency {
        Some(symbol) if !symbol.is_empty() => format!("Price ({})", symbol),
        _ => "Price".to_string(),
    };
    let mut header: Vec<String> = LEDGER_HEADER.iter().map(|h| h.to_string()).collect();
    header.push(price_header);

    let rows = ledger.components().iter().map(|c| {
        [
            c.name.clone(),
            c.formula_label.clone(),
            fixed(c.height, 2),
            fixed(c.width, 2),
            fixed(c.area, 4),
            fixed(c.price, 2),
        ]
    });

    let mut out = Vec::new();
    write_records(&mut out, QuoteStyle::Necessary, [header])?;
    write_records(&mut out, QuoteStyle::NonNumeric, rows)?;
    out.push(b'\n');
    let total = [
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        fixed(ledger.total_area(), 4),
        fixed(ledger.total_price(), 2),
    ];
    write_records(&mut out, QuoteStyle::Necessary, [total])?;
    into_text(out)
}

/// Cutting list as CSV, one row per item in category order.
pub fn cutting_list_to_csv(list: &CuttingList) -> CabinetResult<String> {
    let rows = list.items().map(|(category, item)| {
        [
            category.label().to_string(),
            item.part_id.clone(),
            item.dimensions.clone(),
            item.height.to_string(),
            item.width.to_string(),
            item.quantity.to_string(),
            item.material_type.clone(),
            item.notes.clone(),
        ]
    });

    let mut out = Vec::new();
    write_records(&mut out, QuoteStyle::Necessary, [CUTTING_LIST_HEADER])?;
    write_records(&mut out, QuoteStyle::NonNumeric, rows)?;
    into_text(out)
}
