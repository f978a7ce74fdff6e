use crate::listings::normalize::{ExtractionPolicy, NormalizeError};
use crate::listings::NA;
use serde_json::{Number, Value};

// prop
//  ├── location
//  │    └── address { line, city, state_code, postal_code }
//  ├── description { beds, baths_consolidated, sqft, lot_sqft, type, sub_type }
//  ├── list_price, listing_id, property_id, list_date, permalink
//  ├── flags { is_new_listing, is_price_reduced, is_pending, ... }
//  ├── pet_policy { cats, dogs_small, dogs_large }
//  ├── details[] { category, text[] }
//  ├── advertisers[] { type, office { phones[] { number } } }
//  ├── primary_photo { href }, photos[], virtual_tours[] { href }
//  └── branding[] { name }

/// Read-only view over one listing (or one nested object of a listing)
/// exactly as the search API returned it.
///
/// Nothing here panics: a lookup on a value of the wrong type behaves like a
/// missing key.
#[derive(Debug, Clone, Copy)]
pub struct RawListing<'a> {
    value: &'a Value,
}

impl<'a> RawListing<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn is_object(&self) -> bool {
        self.value.is_object()
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key)
    }

    /// Canonical text for `key`, `"N/A"` when absent.
    pub fn text(&self, key: &str) -> String {
        canonical_text(self.get(key))
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        numeric(self.get(key))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(is_truthy).unwrap_or(false)
    }

    /// Nested object lookup.
    ///
    /// A missing key is `Ok(None)`. A key holding anything other than an
    /// object (null included) is an error under `SkipRecord` and `Ok(None)`
    /// under `DefaultField`.
    pub fn section(
        &self,
        key: &str,
        policy: ExtractionPolicy,
    ) -> Result<Option<RawListing<'a>>, NormalizeError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) if v.is_object() => Ok(Some(RawListing::new(v))),
            Some(v) => match policy {
                ExtractionPolicy::SkipRecord => Err(NormalizeError::UnexpectedShape {
                    field: key.to_string(),
                    found: kind_of(v),
                }),
                ExtractionPolicy::DefaultField => Ok(None),
            },
        }
    }

    /// Nested object lookup that never fails; used by sub-extractions.
    pub fn object(&self, key: &str) -> Option<RawListing<'a>> {
        self.get(key)
            .filter(|v| v.is_object())
            .map(RawListing::new)
    }

    /// Elements of the array at `key`; empty when absent or not an array.
    pub fn list(&self, key: &str) -> &'a [Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First element of the array at `key`, when it is an object.
    pub fn first(&self, key: &str) -> Option<RawListing<'a>> {
        self.list(key)
            .first()
            .filter(|v| v.is_object())
            .map(RawListing::new)
    }
}

/// Text field of an optional section, `"N/A"` when the section is missing.
pub fn text_in(section: Option<RawListing<'_>>, key: &str) -> String {
    section
        .map(|s| s.text(key))
        .unwrap_or_else(|| NA.to_string())
}

/// Renders a scalar the same way regardless of how the vendor encoded it:
/// strings verbatim, numbers canonically (`2` and `2.0` are both `"2"`).
pub fn canonical_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => canonical_number(n),
        Some(Value::Bool(b)) => b.to_string(),
        _ => NA.to_string(),
    }
}

fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64 Display drops a zero fraction: 2.0 -> "2"
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| NA.to_string())
    }
}

/// A JSON number or a numeric string; anything else (including NaN) is missing.
pub fn numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_text_merges_number_encodings() {
        assert_eq!(canonical_text(Some(&json!(2))), "2");
        assert_eq!(canonical_text(Some(&json!(2.0))), "2");
        assert_eq!(canonical_text(Some(&json!(1.5))), "1.5");
        assert_eq!(canonical_text(Some(&json!("2.0"))), "2.0");
        assert_eq!(canonical_text(Some(&Value::Null)), "N/A");
        assert_eq!(canonical_text(Some(&json!([1, 2]))), "N/A");
        assert_eq!(canonical_text(None), "N/A");
    }

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric(Some(&json!(1500))), Some(1500.0));
        assert_eq!(numeric(Some(&json!(" 1450.5 "))), Some(1450.5));
        assert_eq!(numeric(Some(&json!("call for price"))), None);
        assert_eq!(numeric(Some(&json!("NaN"))), None);
        assert_eq!(numeric(Some(&Value::Null)), None);
        assert_eq!(numeric(None), None);
    }

    #[test]
    fn section_honours_policy_on_wrong_type() {
        let prop = json!({ "location": "somewhere", "description": null });
        let raw = RawListing::new(&prop);

        assert!(raw.section("location", ExtractionPolicy::SkipRecord).is_err());
        assert!(raw
            .section("location", ExtractionPolicy::DefaultField)
            .unwrap()
            .is_none());
        assert!(raw.section("description", ExtractionPolicy::SkipRecord).is_err());
        assert!(raw
            .section("flags", ExtractionPolicy::SkipRecord)
            .unwrap()
            .is_none());
    }

    #[test]
    fn list_and_first_tolerate_wrong_types() {
        let prop = json!({ "photos": "none", "virtual_tours": ["not-an-object"] });
        let raw = RawListing::new(&prop);

        assert!(raw.list("photos").is_empty());
        assert!(raw.first("virtual_tours").is_none());
        assert!(raw.first("missing").is_none());
    }
}
