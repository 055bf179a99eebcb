//! Keyword dispatch from a free-text query to one of five intents.
//!
//! Detection order is fixed; the first intent with a matching keyword
//! wins, and a query with no match routes to the default template.

/// The five supported analysis intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Spending,
    Income,
    Budget,
    PaymentMethods,
    Advice,
}

impl Intent {
    /// All intents, in detection order.
    pub const ALL: [Intent; 5] = [
        Intent::Spending,
        Intent::Income,
        Intent::Budget,
        Intent::PaymentMethods,
        Intent::Advice,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Intent::Spending => &["spending", "expense", "cost"],
            Intent::Income => &["income", "earn", "salary"],
            Intent::Budget => &["budget", "save", "financial health"],
            Intent::PaymentMethods => &["cash", "online", "digital"],
            Intent::Advice => &["advice", "recommend", "suggestion"],
        }
    }

    /// First matching intent in detection order, or `None` for the
    /// default template.
    pub fn detect(query: &str) -> Option<Intent> {
        let q = query.to_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.keywords().iter().any(|kw| q.contains(kw)))
    }
}
