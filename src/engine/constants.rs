/// Days used to scale daily weight to a weekly purchase.
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Days used to project the daily cost to a monthly budget.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Prefix of the name given to a recipe's virtual ingredient.
pub const RECIPE_NAME_PREFIX: &str = "Recipe: ";

/// Separator for joined ingredient names and per-item figures.
pub const LIST_SEPARATOR: &str = ", ";

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
