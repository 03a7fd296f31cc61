pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use engine::{compose_recipe, compute_totals, update_field, Totals};
pub use error::{MealError, Result};
pub use models::{Ingredient, Recipe, RecipeLineItem, RecipeTotals};
pub use state::{Ledger, RecipeBook};
