use crate::listings::RawListing;
use serde_json::Value;

/// Pulls one value out of the vendor's free-text `details` groups.
///
/// A group matches when its `category` equals `category`; within it, any text
/// line containing `marker` yields the trimmed text after the first
/// occurrence of the marker. When several lines match, the last one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRule {
    pub category: String,
    pub marker: String,
}

impl DetailRule {
    pub fn new(category: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            marker: marker.into(),
        }
    }

    pub fn scan(&self, details: &[Value]) -> Option<String> {
        let mut found = None;

        for group in details.iter().map(RawListing::new) {
            if !group.is_object() {
                continue;
            }
            if group.get("category").and_then(Value::as_str) != Some(self.category.as_str()) {
                continue;
            }

            for line in group.list("text").iter().filter_map(Value::as_str) {
                if let Some((_, rest)) = line.split_once(self.marker.as_str()) {
                    found = Some(rest.trim().to_string());
                }
            }
        }

        found
    }
}

/// The detail rules applied to rental listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRules {
    pub security_deposit: DetailRule,
    pub availability_date: DetailRule,
}

impl Default for DetailRules {
    fn default() -> Self {
        Self {
            security_deposit: DetailRule::new("Rental Info", "Security Deposit:"),
            availability_date: DetailRule::new("Other Property Info", "Availability Date:"),
        }
    }
}
