use serde_json::Value;

/// Look up a field in a record by name or dotted path.
///
/// A key equal to the whole `path` wins over a dotted walk, so fields whose
/// names contain dots stay addressable. Arrays are indexed by numeric
/// segments.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = record.as_object().and_then(|map| map.get(path)) {
        return Some(value);
    }
    path.split('.')
        .try_fold(record, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        })
}
