//! Field extraction from raw catalog records.
//!
//! Every lookup goes through [`extract`], which classifies what it finds as
//! [`Extracted::Missing`], a [`Extracted::Scalar`] display string, or a
//! [`Extracted::Structured`] object/array. Structured values are turned into
//! display strings by a single reducer, [`reduce_display`]. The `first_*`
//! combinators walk an ordered candidate-path list and return the first
//! candidate that resolves to a non-empty value.
//!
//! ## Path syntax
//!
//! Paths are dot-separated keys (`"battery.capacity"`). A numeric segment
//! indexes into an array (`"images.0"`). A key segment applied to an array
//! selects the first element object that carries the key, so
//! `"camera.rear_camera.ois"` reads the first rear sensor with an `ois` flag.

use serde_json::{Map, Number, Value};

use crate::parse_helpers;

/// Sub-keys tried, in order, when reducing an object to a display string.
const DISPLAY_KEYS: [&str; 5] = ["name", "title", "model", "label", "value"];

/// Sub-keys that hold an image URL inside an image object.
const IMAGE_URL_KEYS: [&str; 4] = ["url", "src", "image", "href"];

/// Outcome of resolving one candidate path against a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<'a> {
    /// Absent, `null`, blank string, or empty object/array.
    Missing,
    /// A string, number, or boolean rendered as trimmed display text.
    Scalar(String),
    /// A non-empty object or array, left for the caller to interpret.
    Structured(&'a Value),
}

impl Extracted<'_> {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Extracted::Missing)
    }

    /// Display text for this value. Structured values go through
    /// [`reduce_display`].
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Extracted::Missing => None,
            Extracted::Scalar(text) => Some(text),
            Extracted::Structured(value) => reduce_display(value),
        }
    }
}

/// Resolves `path` against `record` and classifies the result.
#[must_use]
pub fn extract<'a>(record: &'a Value, path: &str) -> Extracted<'a> {
    match lookup(record, path) {
        None | Some(Value::Null) => Extracted::Missing,
        Some(Value::String(s)) => scalar(s.trim()),
        Some(Value::Number(n)) => Extracted::Scalar(format_number(n)),
        Some(Value::Bool(b)) => Extracted::Scalar(yes_no(*b).to_string()),
        Some(Value::Array(items)) if items.is_empty() => Extracted::Missing,
        Some(Value::Object(map)) if map.is_empty() => Extracted::Missing,
        Some(value) => Extracted::Structured(value),
    }
}

fn scalar(text: &str) -> Extracted<'static> {
    if text.is_empty() {
        Extracted::Missing
    } else {
        Extracted::Scalar(text.to_string())
    }
}

/// Walks a dot-separated path. See the module docs for the segment rules.
#[must_use]
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items.get(index)?,
                Err(_) => items
                    .iter()
                    .find_map(|item| item.as_object().and_then(|m| m.get(segment)))?,
            },
            _ => return None,
        };
    }
    Some(current)
}

/// Reduces any JSON value to a display string.
///
/// - strings are trimmed; blank strings are `None`;
/// - integers print without a fractional part;
/// - booleans print as `Yes`/`No`;
/// - arrays join their reduced elements with `", "`;
/// - objects use the first non-empty of `name`, `title`, `model`, `label`,
///   `value`, falling back to compact JSON.
#[must_use]
pub fn reduce_display(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(format_number(n)),
        Value::Bool(b) => Some(yes_no(*b).to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(reduce_display).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => reduce_object(map),
    }
}

fn reduce_object(map: &Map<String, Value>) -> Option<String> {
    if map.is_empty() {
        return None;
    }
    DISPLAY_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(reduce_display))
        .or_else(|| serde_json::to_string(map).ok())
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// First candidate path that resolves to non-empty display text.
#[must_use]
pub fn first_text(record: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| extract(record, path).into_text())
}

/// First candidate path holding a non-empty value, returned unreduced.
#[must_use]
pub fn first_value<'a>(record: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| match extract(record, path) {
        Extracted::Missing => None,
        _ => lookup(record, path),
    })
}

/// First candidate path that yields a finite number.
///
/// JSON numbers are taken as-is; strings and reduced objects contribute
/// their first decimal number.
#[must_use]
pub fn first_number(record: &Value, paths: &[&str]) -> Option<f64> {
    paths.iter().find_map(|path| match lookup(record, path)? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        other => reduce_display(other)
            .and_then(|text| parse_helpers::first_number(&text))
            .filter(|f| f.is_finite()),
    })
}

/// First candidate path that reads as a yes/no flag.
///
/// Accepts booleans, non-zero numbers, and the usual spellings
/// (`"yes"`, `"supported"`, `"no"`, `"none"`, ...). Unrecognised text is
/// skipped so a later candidate can answer.
#[must_use]
pub fn first_bool(record: &Value, paths: &[&str]) -> Option<bool> {
    paths.iter().find_map(|path| match lookup(record, path)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => parse_flag(s),
        _ => None,
    })
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "available" | "supported" | "present" => Some(true),
        "no" | "n" | "false" | "0" | "none" | "not available" | "not supported" | "absent" => {
            Some(false)
        }
        _ => None,
    }
}

/// First candidate path that yields at least one string.
///
/// Arrays contribute each reduced element; a single string is split on
/// commas and pipes.
#[must_use]
pub fn string_list(record: &Value, paths: &[&str]) -> Vec<String> {
    paths
        .iter()
        .map(|path| match extract(record, path) {
            Extracted::Missing => Vec::new(),
            Extracted::Scalar(text) => text
                .split([',', '|'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Extracted::Structured(Value::Array(items)) => {
                items.iter().filter_map(reduce_display).collect()
            }
            Extracted::Structured(other) => reduce_display(other).into_iter().collect(),
        })
        .find(|list| !list.is_empty())
        .unwrap_or_default()
}

/// Image URLs from the first candidate path that has any.
///
/// Accepts a single URL string, an array of strings, or an array of objects
/// carrying `url`/`src`/`image`/`href`.
#[must_use]
pub fn image_urls(record: &Value, paths: &[&str]) -> Vec<String> {
    paths
        .iter()
        .map(|path| match lookup(record, path) {
            Some(Value::Array(items)) => items.iter().filter_map(image_url).collect(),
            Some(other) => image_url(other).into_iter().collect(),
            None => Vec::new(),
        })
        .find(|urls: &Vec<String>| !urls.is_empty())
        .unwrap_or_default()
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Object(map) => IMAGE_URL_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(image_url)),
        _ => None,
    }
}

/// Array under the first candidate path that holds one.
#[must_use]
pub fn first_array<'a>(record: &'a Value, paths: &[&str]) -> Option<&'a Vec<Value>> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(Value::as_array))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extract_classifies_shapes() {
        let record = json!({
            "name": "  Galaxy S24 ",
            "blank": "   ",
            "price": 23000,
            "nfc": true,
            "display": {"size": "6.2 inch"},
            "tags": [],
            "nothing": null
        });
        assert_eq!(
            extract(&record, "name"),
            Extracted::Scalar("Galaxy S24".to_string())
        );
        assert!(extract(&record, "blank").is_missing());
        assert_eq!(extract(&record, "price"), Extracted::Scalar("23000".to_string()));
        assert_eq!(extract(&record, "nfc"), Extracted::Scalar("Yes".to_string()));
        assert!(matches!(extract(&record, "display"), Extracted::Structured(_)));
        assert!(extract(&record, "tags").is_missing());
        assert!(extract(&record, "nothing").is_missing());
        assert!(extract(&record, "absent.deeper").is_missing());
    }

    #[test]
    fn lookup_indexes_arrays_and_searches_objects() {
        let record = json!({
            "images": ["a.jpg", "b.jpg"],
            "camera": {"rear_camera": [{"megapixels": 50}, {"megapixels": 12, "ois": true}]},
            "_id": {"$oid": "65f0c0ffee"}
        });
        assert_eq!(lookup(&record, "images.1"), Some(&json!("b.jpg")));
        assert_eq!(lookup(&record, "camera.rear_camera.ois"), Some(&json!(true)));
        assert_eq!(lookup(&record, "_id.$oid"), Some(&json!("65f0c0ffee")));
        assert!(lookup(&record, "images.9").is_none());
    }

    #[test]
    fn reduce_display_prefers_named_sub_keys() {
        assert_eq!(
            reduce_display(&json!({"model": "Core i7", "name": "Intel Core i7-13700H"})),
            Some("Intel Core i7-13700H".to_string())
        );
        assert_eq!(
            reduce_display(&json!({"label": "", "value": "8 GB"})),
            Some("8 GB".to_string())
        );
    }

    #[test]
    fn reduce_display_falls_back_to_compact_json() {
        assert_eq!(
            reduce_display(&json!({"cores": 8})),
            Some("{\"cores\":8}".to_string())
        );
    }

    #[test]
    fn reduce_display_joins_arrays() {
        assert_eq!(
            reduce_display(&json!(["5G", {"name": "Wi-Fi 7"}, null, " "])),
            Some("5G, Wi-Fi 7".to_string())
        );
        assert_eq!(reduce_display(&json!([])), None);
    }

    #[test]
    fn integers_render_without_fraction() {
        assert_eq!(reduce_display(&json!(6.0)), Some("6".to_string()));
        assert_eq!(reduce_display(&json!(6.7)), Some("6.7".to_string()));
    }

    #[test]
    fn first_text_skips_empty_candidates() {
        let record = json!({"title": "", "productName": "Pixel 8", "name": null});
        assert_eq!(
            first_text(&record, &["name", "title", "productName"]),
            Some("Pixel 8".to_string())
        );
        assert_eq!(first_text(&record, &["brand"]), None);
    }

    #[test]
    fn first_number_reads_numbers_and_strings() {
        let record = json!({"rating": {"average": "4.4 / 5"}, "score": 3.9});
        assert_eq!(first_number(&record, &["rating.average", "score"]), Some(4.4));
        assert_eq!(first_number(&record, &["missing", "score"]), Some(3.9));
    }

    #[test]
    fn first_bool_skips_unrecognised_text() {
        let record = json!({"a": "maybe", "b": "Supported", "c": 0});
        assert_eq!(first_bool(&record, &["a", "b"]), Some(true));
        assert_eq!(first_bool(&record, &["c"]), Some(false));
        assert_eq!(first_bool(&record, &["a"]), None);
    }

    #[test]
    fn string_list_splits_scalars_and_reduces_arrays() {
        let record = json!({
            "features": "5G, NFC | IP68",
            "highlights": [{"title": "AI Eraser"}, "Circle to Search"]
        });
        assert_eq!(string_list(&record, &["features"]), ["5G", "NFC", "IP68"]);
        assert_eq!(
            string_list(&record, &["missing", "highlights"]),
            ["AI Eraser", "Circle to Search"]
        );
    }

    #[test]
    fn image_urls_accept_strings_and_objects() {
        let record = json!({
            "images": [{"url": "a.jpg"}, "b.jpg", {"alt": "no url"}],
            "thumbnail": "t.jpg"
        });
        assert_eq!(image_urls(&record, &["images"]), ["a.jpg", "b.jpg"]);
        assert_eq!(image_urls(&record, &["gallery", "thumbnail"]), ["t.jpg"]);
    }
}
