use serde::Serialize;

/// One ingredient entry within a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeLineItem {
    pub name: String,

    /// Ounces of this ingredient in the recipe.
    pub amount: f64,

    pub cost_per_oz: f64,

    pub calories_per_oz: f64,
}

impl RecipeLineItem {
    pub fn new(name: impl Into<String>, amount: f64, cost_per_oz: f64, calories_per_oz: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            cost_per_oz,
            calories_per_oz,
        }
    }

    pub fn cost(&self) -> f64 {
        self.amount * self.cost_per_oz
    }

    pub fn calories(&self) -> f64 {
        self.amount * self.calories_per_oz
    }
}

/// Aggregate figures for a whole recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeTotals {
    pub total_weight: f64,
    pub total_cost: f64,
    pub total_calories: f64,
    pub cost_per_oz: f64,
    pub calories_per_oz: f64,
}

/// A recipe-history record: the line items plus their derived totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub line_items: Vec<RecipeLineItem>,
    pub totals: RecipeTotals,
}

impl Recipe {
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.line_items.iter().map(|item| item.name.as_str()).collect()
    }
}
