//! Static tool catalog.
//!
//! The catalog is read by the matcher and by the dashboard grid but never
//! mutated. A JSON file may replace the built-in list at startup.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;
use toolverse_core::{Error, Result};
use tracing::info;

use crate::types::CatalogItem;

/// Display order of categories on the dashboard.
pub const CATEGORIES: &[&str] = &["Health & Fitness", "Lifestyle", "Finance", "Utilities", "News"];

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::new(builtin_items())));

/// Items sharing a category, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<CatalogItem>,
}

/// Ordered, immutable list of catalog items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN.clone()
    }

    /// Load a catalog from a JSON array of items.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<CatalogItem> = serde_json::from_str(&raw)?;
        if let Some(dup) = first_duplicate_id(&items) {
            return Err(Error::Config(format!(
                "duplicate catalog id '{}' in {}",
                dup,
                path.display()
            )));
        }
        info!("Loaded {} catalog items from {}", items.len(), path.display());
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Group items by category. Known categories come first in dashboard
    /// order, unknown ones follow in order of first appearance. Empty
    /// categories are skipped.
    pub fn by_category(&self) -> Vec<CategoryGroup> {
        let mut order: Vec<&str> = CATEGORIES.to_vec();
        for item in &self.items {
            if !order.contains(&item.category.as_str()) {
                order.push(&item.category);
            }
        }

        order
            .into_iter()
            .filter_map(|category| {
                let items: Vec<CatalogItem> = self
                    .items
                    .iter()
                    .filter(|item| item.category == category)
                    .cloned()
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(CategoryGroup {
                        category: category.to_string(),
                        items,
                    })
                }
            })
            .collect()
    }
}

fn first_duplicate_id(items: &[CatalogItem]) -> Option<&str> {
    items.iter().enumerate().find_map(|(i, item)| {
        items[..i]
            .iter()
            .any(|prev| prev.id == item.id)
            .then_some(item.id.as_str())
    })
}

fn item(
    id: &str,
    display_name: &str,
    description: &str,
    keywords: &[&str],
    icon_ref: &str,
    category: &str,
) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        display_name: display_name.into(),
        description: description.into(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        navigation_target: format!("/{}", id),
        icon_ref: icon_ref.into(),
        category: category.into(),
    }
}

fn builtin_items() -> Vec<CatalogItem> {
    vec![
        item(
            "bmi-calculator",
            "BMI Calculator",
            "Check your body mass index and healthy weight range.",
            &["bmi", "weight", "height", "body", "health"],
            "fa-weight-scale",
            "Health & Fitness",
        ),
        item(
            "health-wellness",
            "Health & Wellness",
            "Personalized daily wellness plan with habits, mindfulness and nutrition.",
            &["wellness", "habits", "sleep", "stress", "mindfulness", "coach"],
            "fa-heart-pulse",
            "Health & Fitness",
        ),
        item(
            "calorie-calculator",
            "Calorie Calculator",
            "Estimate your daily calorie needs by activity level.",
            &["calories", "diet", "nutrition", "tdee"],
            "fa-apple-whole",
            "Health & Fitness",
        ),
        item(
            "beauty-tips",
            "Beauty Tips",
            "Skincare routines matched to your skin type and concern.",
            &["skincare", "beauty", "skin", "routine"],
            "fa-spa",
            "Lifestyle",
        ),
        item(
            "age-calculator",
            "Age Calculator",
            "Exact age in years, months and days.",
            &["age", "birthday", "date"],
            "fa-cake-candles",
            "Lifestyle",
        ),
        item(
            "loan-calculator",
            "Loan Calculator",
            "Monthly payment and total interest for any loan.",
            &["loan", "emi", "mortgage", "interest"],
            "fa-hand-holding-dollar",
            "Finance",
        ),
        item(
            "budget-planner",
            "Budget Planner",
            "Split your income across needs, wants and savings.",
            &["budget", "savings", "expenses", "money"],
            "fa-wallet",
            "Finance",
        ),
        item(
            "unit-converter",
            "Unit Converter",
            "Convert length, weight, temperature and more.",
            &["convert", "units", "metric", "imperial"],
            "fa-right-left",
            "Utilities",
        ),
        item(
            "password-generator",
            "Password Generator",
            "Strong random passwords with configurable character sets.",
            &["password", "security", "random"],
            "fa-key",
            "Utilities",
        ),
        item(
            "news-headlines",
            "News Headlines",
            "Today's top stories with links to their sources.",
            &["news", "headlines", "today", "stories"],
            "fa-newspaper",
            "News",
        ),
    ]
}
