//! Run summary table printed after the pipeline finishes.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::pipeline::RunSummary;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn print_summary(summary: &RunSummary) {
    println!("Output: {}", summary.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("Status"),
        header_cell("Files"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for country in &summary.countries {
        let status = if country.failed {
            "failed"
        } else if country.updated {
            "updated"
        } else {
            "no change"
        };
        table.add_row(vec![
            Cell::new(&country.countryiso3),
            Cell::new(status),
            Cell::new(country.files),
        ]);
    }
    println!("{table}");

    let updated = summary.countries.iter().filter(|c| c.updated).count();
    println!(
        "{updated} of {} countries updated, {} global files",
        summary.countries.len(),
        summary.global_files
    );
    if let Some(records) = summary.hapi_records {
        println!("{records} harmonized records");
    }
}
