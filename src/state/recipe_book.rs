use tracing::info;

use crate::engine::recipe::{build_recipe, project_recipe};
use crate::error::Result;
use crate::models::{Consumable, Ingredient, Recipe, RecipeLineItem};
use crate::state::Ledger;

/// Recipe history, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Compose a recipe, append it to the history and its virtual ingredient
/// to the ledger.
///
/// All-or-nothing: every check runs before either table is touched.
pub fn record_recipe(
    ledger: &mut Ledger,
    book: &mut RecipeBook,
    line_items: Vec<RecipeLineItem>,
) -> Result<(Recipe, Ingredient)> {
    let recipe = build_recipe(line_items)?;
    let projected = project_recipe(&recipe);
    ledger.check_insert(&projected)?;

    ledger.insert(projected.clone())?;
    book.recipes.push(recipe.clone());
    info!(
        name = projected.name(),
        total_weight = recipe.totals.total_weight,
        "recorded recipe"
    );

    Ok((recipe, projected))
}
