use serde_json::Value;

use super::flatten::{flatten_fields, scalar_text};

/// Headline figure per command, looked up by dotted key.
const HEADLINE_KEYS: [&str; 7] = [
    "costs.total_cost",
    "suggested_rate",
    "amount",
    "leverage_multiple",
    "household_effective_rate",
    "base_case_value",
    "total_cost",
];

/// Print only the headline value of the result, falling back to the first
/// field.
pub fn print_minimal(value: &Value) {
    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = body else {
        println!("{}", scalar_text(body));
        return;
    };

    if let Some(Value::Array(steps)) = map.get("results") {
        if let Some(last) = steps.last() {
            print_minimal(last);
            return;
        }
    }

    let fields = flatten_fields(map);
    let headline = HEADLINE_KEYS.iter().find_map(|key| {
        fields
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    });

    match headline {
        Some(v) => println!("{}", v),
        None => match fields.first() {
            Some((k, v)) => println!("{}: {}", k, v),
            None => println!("{}", scalar_text(body)),
        },
    }
}
