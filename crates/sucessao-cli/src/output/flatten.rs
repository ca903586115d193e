use serde_json::{Map, Value};

/// Scalar fields of a nested object as `(dotted.key, text)` pairs, in
/// document order. Arrays of objects are skipped here and rendered as their
/// own sections by the callers; arrays of scalars are joined with `", "`.
pub fn flatten_fields(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    walk(None, map, &mut fields);
    fields
}

fn walk(prefix: Option<&str>, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match val {
            Value::Object(inner) => walk(Some(&path), inner, out),
            Value::Array(items) if is_record_list(items) => {}
            other => out.push((path, scalar_text(other))),
        }
    }
}

/// Every array of objects inside the value, keyed by its dotted path.
pub fn record_lists<'a>(map: &'a Map<String, Value>) -> Vec<(String, &'a [Value])> {
    let mut lists = Vec::new();
    collect_lists(None, map, &mut lists);
    lists
}

fn collect_lists<'a>(
    prefix: Option<&str>,
    map: &'a Map<String, Value>,
    out: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match val {
            Value::Object(inner) => collect_lists(Some(&path), inner, out),
            Value::Array(items) if is_record_list(items) => out.push((path, items.as_slice())),
            _ => {}
        }
    }
}

pub fn is_record_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

/// Header row for a list of records: the union of their flattened keys, in
/// first-seen order.
pub fn record_headers(items: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for (key, _) in flatten_fields(map) {
                if !headers.contains(&key) {
                    headers.push(key);
                }
            }
        }
    }
    headers
}

pub fn record_row(item: &Value, headers: &[String]) -> Vec<String> {
    let fields = match item {
        Value::Object(map) => flatten_fields(map),
        other => vec![(String::new(), scalar_text(other))],
    };
    headers
        .iter()
        .map(|h| {
            fields
                .iter()
                .find(|(k, _)| k == h)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        })
        .collect()
}

pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_become_dotted_keys() {
        let v = json!({
            "costs": {"total_cost": "240000", "itcmd_rate": "4"},
            "taxable_base": "4000000",
            "proposed_law_impact": null
        });
        let fields = flatten_fields(v.as_object().unwrap());
        assert!(fields.contains(&("costs.total_cost".into(), "240000".into())));
        assert!(fields.contains(&("taxable_base".into(), "4000000".into())));
        assert!(fields.contains(&("proposed_law_impact".into(), String::new())));
    }

    #[test]
    fn test_record_lists_are_split_out() {
        let v = json!({
            "household_rank": 6,
            "rows": [{"country": "Japão", "rate": "55"}, {"country": "Chile", "rate": "25"}]
        });
        let map = v.as_object().unwrap();
        assert_eq!(flatten_fields(map).len(), 1);
        let lists = record_lists(map);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].0, "rows");
        let headers = record_headers(lists[0].1);
        assert_eq!(headers, vec!["country".to_string(), "rate".to_string()]);
        assert_eq!(record_row(&lists[0].1[1], &headers), vec!["Chile", "25"]);
    }
}
