use serde_json::{Map, Value};
use std::io;

use super::flatten::{flatten_fields, is_record_list, record_headers, record_row, scalar_text};

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// CSV to stdout. A list of records (session steps, benchmark rows) becomes
/// one row per record; any other result becomes `field,value` pairs with
/// dotted keys.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match primary_records(body) {
                Some(items) => write_records(&mut wtr, items),
                None => write_fields(&mut wtr, body),
            }
        }
        Value::Array(items) => write_records(&mut wtr, items),
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

/// The record list that carries the answer, when the result is mostly one.
fn primary_records(map: &Map<String, Value>) -> Option<&[Value]> {
    ["results", "rows"].iter().find_map(|key| match map.get(*key) {
        Some(Value::Array(items)) if is_record_list(items) => Some(items.as_slice()),
        _ => None,
    })
}

fn write_fields(wtr: &mut StdoutCsv<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten_fields(map) {
        let _ = wtr.write_record([key, val]);
    }
}

fn write_records(wtr: &mut StdoutCsv<'_>, items: &[Value]) {
    let headers = record_headers(items);
    if headers.is_empty() {
        for item in items {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    }
    let _ = wtr.write_record(&headers);
    for item in items {
        let _ = wtr.write_record(record_row(item, &headers));
    }
}
