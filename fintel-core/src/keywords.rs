//! Ordered keyword table mapping description substrings to categories.
//!
//! Table order is a semantic part of the configuration: the first rule
//! whose keyword matches wins, so two tables with the same rules in a
//! different order are different tables.

use serde::{Deserialize, Serialize};

/// Category assigned when no rule matches.
pub const OTHER_CATEGORY: &str = "other";

/// One (category, keywords) rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

/// An ordered sequence of category rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordTable {
    rules: Vec<CategoryRule>,
}

impl KeywordTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The built-in fallback table, used whenever configuration cannot be
    /// loaded.
    pub fn default_table() -> Self {
        fn rule(category: &str, keywords: &[&str]) -> CategoryRule {
            CategoryRule {
                category: category.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }
        Self::new(vec![
            rule("food", &["restaurant", "grocery", "food", "dining", "meal"]),
            rule("transport", &["gas", "fuel", "uber", "taxi", "transport"]),
            rule("entertainment", &["movie", "cinema", "game", "entertainment"]),
            rule("shopping", &["store", "shop", "amazon", "purchase"]),
            rule("utilities", &["electric", "water", "internet", "phone"]),
        ])
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Categorize a description: lowercase it, scan rules in table order,
    /// and return the first category with a substring match. No
    /// normalization beyond case-folding.
    pub fn categorize<'a>(&'a self, description: &str) -> &'a str {
        let desc = description.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|kw| desc.contains(kw.as_str())) {
                return &rule.category;
            }
        }
        OTHER_CATEGORY
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::default_table()
    }
}
