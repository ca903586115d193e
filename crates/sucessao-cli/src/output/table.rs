use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::flatten::{flatten_fields, record_headers, record_lists, record_row, scalar_text};

/// Render the envelope as tables: one field/value table for the scalar
/// result, one table per list of records (benchmark rows, bracket slices,
/// session steps), then warnings and methodology.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_sections(result);
                print_envelope_notes(map);
            }
            _ => print_sections(map),
        },
        Value::Array(items) => print_records(items),
        other => println!("{}", scalar_text(other)),
    }
}

fn print_sections(map: &Map<String, Value>) {
    let fields = flatten_fields(map);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, items) in record_lists(map) {
        println!("\n{}", name.bold());
        print_records(items);
    }
}

fn print_records(items: &[Value]) {
    if items.is_empty() {
        println!("(empty)");
        return;
    }
    let headers = record_headers(items);
    if headers.is_empty() {
        for item in items {
            println!("{}", scalar_text(item));
        }
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in items {
        builder.push_record(record_row(item, &headers));
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w.yellow());
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
