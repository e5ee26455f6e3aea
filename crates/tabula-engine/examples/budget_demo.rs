//! Small demo: build a sheet with formulas and print its values and texts.
//!
//! Run with: cargo run --example budget_demo

use tabula_core::CellCoord;
use tabula_engine::Sheet;

fn set(sheet: &mut Sheet, a1: &str, text: &str) {
    sheet
        .set_cell(CellCoord::from_a1(a1).unwrap(), text)
        .unwrap();
}

fn main() {
    let mut sheet = Sheet::new();

    set(&mut sheet, "A1", "rent");
    set(&mut sheet, "B1", "1200");
    set(&mut sheet, "A2", "food");
    set(&mut sheet, "B2", "450.50");
    set(&mut sheet, "A3", "total");
    set(&mut sheet, "B3", "=B1+B2");
    set(&mut sheet, "A4", "monthly avg");
    set(&mut sheet, "B4", "=ROUND(B3/2, 2)");

    println!("printable size: {}", sheet.printable_size());
    println!("--- values ---");
    print!("{}", sheet.values_to_string());
    println!("--- texts ---");
    print!("{}", sheet.texts_to_string());

    // A failing edit leaves everything untouched
    if let Err(err) = sheet.set_cell(CellCoord::from_a1("B1").unwrap(), "=B3") {
        println!("rejected edit: {}", err);
    }
    println!("--- values after rejected edit ---");
    print!("{}", sheet.values_to_string());
}
