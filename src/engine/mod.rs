pub mod aggregate;
pub mod constants;
pub mod ranking;
pub mod recipe;
pub mod update;

pub use aggregate::{compute_totals, IngredientTotals, MealCalories, Totals};
pub use constants::*;
pub use ranking::{rank_by_efficiency, Efficiency, RankedIngredient};
pub use recipe::{build_recipe, compose_recipe, project_recipe, recipe_ingredient_name};
pub use update::update_field;
