//! Budget model and the conversion arithmetic applied to it.
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Key of the computed total in budget responses.
pub const TOTAL_FIELD: &str = "total";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Activities,
    Shopping,
    Hotel,
    Transportation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Activities,
        Category::Shopping,
        Category::Hotel,
        Category::Transportation,
    ];

    /// Key used for this category in budget payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Activities => "activities",
            Category::Shopping => "shopping",
            Category::Hotel => "hotel",
            Category::Transportation => "transportation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Activities => "Activities & Tours",
            Category::Shopping => "Shopping",
            Category::Hotel => "Accommodation",
            Category::Transportation => "Transportation",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Invalid budget category: {}", s))
    }
}

/// Amounts per category in one currency.
///
/// Keys outside the five known categories are kept as-is so they can be
/// converted and echoed back, but they never count towards the total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(
        rename = "baseCurrency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub base_currency: Option<String>,
    #[serde(flatten)]
    pub amounts: BTreeMap<String, f64>,
}

impl Budget {
    pub fn new(base_currency: Option<&str>) -> Self {
        Budget {
            base_currency: base_currency.map(str::to_string),
            amounts: BTreeMap::new(),
        }
    }

    pub fn with_amount(mut self, category: Category, amount: f64) -> Self {
        self.set(category, amount);
        self
    }

    pub fn set(&mut self, category: Category, amount: f64) {
        self.amounts.insert(category.key().to_string(), amount);
    }

    /// Amount for a category, zero when absent.
    pub fn amount(&self, category: Category) -> f64 {
        self.amounts.get(category.key()).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        calculate_total(self)
    }
}

/// Rounds the exact binary value to two decimal places, halves to even.
///
/// Values with no decimal representation (non-finite or beyond `Decimal`'s
/// range) are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Multiplies every amount by `rate` and rounds each result to cents.
///
/// The converted budget carries no currency tag.
pub fn convert(budget: &Budget, rate: f64) -> Budget {
    let amounts = budget
        .amounts
        .iter()
        .map(|(category, amount)| (category.clone(), round_to_cents(amount * rate)))
        .collect();

    Budget {
        base_currency: None,
        amounts,
    }
}

/// Sums the five known categories, counting missing ones as zero.
pub fn calculate_total(budget: &Budget) -> f64 {
    Category::ALL.iter().map(|c| budget.amount(*c)).sum()
}

/// A budget paired with its computed total, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    #[serde(flatten)]
    pub budget: Budget,
    pub total: f64,
}

impl BudgetSummary {
    /// A client-supplied `total` key is replaced by the computed one.
    pub fn new(mut budget: Budget) -> Self {
        budget.amounts.remove(TOTAL_FIELD);
        let total = calculate_total(&budget);
        BudgetSummary { budget, total }
    }

    pub fn is_finite(&self) -> bool {
        self.total.is_finite() && self.budget.amounts.values().all(|v| v.is_finite())
    }
}
