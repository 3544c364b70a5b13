//! Helpers for walking scraped JSON whose shape is not under our control.

use serde_json::Value;

/// Deepest nesting level a search will descend into.
pub const MAX_SEARCH_DEPTH: usize = 50;

/// Find the first value stored under `key`, anywhere in `root`.
///
/// Objects are visited in document order, depth first. Returns the path to the
/// match (`a->b[0]->c`) together with the value.
pub fn find_key_with_path<'a>(root: &'a Value, key: &str) -> Option<(String, &'a Value)> {
    let mut path = String::new();
    find_key_inner(root, key, &mut path, 0)
}

fn find_key_inner<'a>(
    value: &'a Value,
    key: &str,
    path: &mut String,
    depth: usize,
) -> Option<(String, &'a Value)> {
    if depth > MAX_SEARCH_DEPTH {
        return None;
    }

    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let len = path.len();
                if !path.is_empty() {
                    path.push_str("->");
                }
                path.push_str(k);

                if k == key {
                    return Some((path.clone(), v));
                }
                if let Some(found) = find_key_inner(v, key, path, depth + 1) {
                    return Some(found);
                }
                path.truncate(len);
            }
            None
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{i}]"));
                if let Some(found) = find_key_inner(v, key, path, depth + 1) {
                    return Some(found);
                }
                path.truncate(len);
            }
            None
        }
        _ => None,
    }
}

/// Find the first node (object or array) for which `pick` yields something.
///
/// The node itself is tried before its children; depth is bounded the same way
/// as [`find_key_with_path`].
pub fn find_map<'a, T>(root: &'a Value, pick: &impl Fn(&'a Value) -> Option<T>) -> Option<T> {
    find_map_inner(root, pick, 0)
}

fn find_map_inner<'a, T>(
    value: &'a Value,
    pick: &impl Fn(&'a Value) -> Option<T>,
    depth: usize,
) -> Option<T> {
    if depth > MAX_SEARCH_DEPTH {
        return None;
    }

    match value {
        Value::Object(map) => pick(value).or_else(|| {
            map.values()
                .find_map(|v| find_map_inner(v, pick, depth + 1))
        }),
        Value::Array(items) => items
            .iter()
            .find_map(|v| find_map_inner(v, pick, depth + 1)),
        _ => None,
    }
}

/// Iterate an array field, yielding nothing when it is absent or not an array.
pub fn array_at<'a>(value: &'a Value, pointer: &str) -> impl Iterator<Item = &'a Value> + use<'a> {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Render a scalar as text. Strings pass through, numbers and booleans are
/// formatted, anything else is `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_nested_key_with_path() {
        let data = json!({
            "contents": {
                "panels": [
                    {"other": 1},
                    {"engagementPanel": {"getTranscriptEndpoint": {"params": "abc"}}}
                ]
            }
        });

        let (path, value) = find_key_with_path(&data, "getTranscriptEndpoint").unwrap();
        assert_eq!(path, "contents->panels[1]->engagementPanel->getTranscriptEndpoint");
        assert_eq!(value["params"], "abc");
    }

    #[test]
    fn first_match_in_document_order_wins() {
        let data = json!({
            "z": {"target": "first"},
            "a": {"target": "second"}
        });
        let (path, value) = find_key_with_path(&data, "target").unwrap();
        assert_eq!(path, "z->target");
        assert_eq!(value, "first");
    }

    #[test]
    fn missing_key_is_none() {
        let data = json!({"a": [1, 2, {"b": null}]});
        assert!(find_key_with_path(&data, "c").is_none());
        assert!(find_key_with_path(&json!("scalar"), "c").is_none());
    }

    #[test]
    fn search_stops_at_depth_bound() {
        let mut data = json!({"needle": true});
        for _ in 0..(MAX_SEARCH_DEPTH + 5) {
            data = json!({ "wrap": data });
        }
        assert!(find_key_with_path(&data, "needle").is_none());

        let mut shallow = json!({"needle": true});
        for _ in 0..10 {
            shallow = json!([shallow]);
        }
        assert!(find_key_with_path(&shallow, "needle").is_some());
    }

    #[test]
    fn find_map_checks_parent_before_children() {
        let data = json!({
            "outer": {"mark": 1, "inner": {"mark": 2}}
        });
        let found = find_map(&data, &|v: &Value| v.get("mark").and_then(Value::as_i64));
        assert_eq!(found, Some(1));
    }

    #[test]
    fn array_at_tolerates_wrong_shapes() {
        let data = json!({"list": [1, 2], "scalar": 3});
        assert_eq!(array_at(&data, "/list").count(), 2);
        assert_eq!(array_at(&data, "/scalar").count(), 0);
        assert_eq!(array_at(&data, "/absent").count(), 0);
    }

    #[test]
    fn scalar_text_renders_numbers() {
        assert_eq!(scalar_text(&json!(1)).as_deref(), Some("1"));
        assert_eq!(scalar_text(&json!("WEB")).as_deref(), Some("WEB"));
        assert_eq!(scalar_text(&json!({})), None);
    }
}
