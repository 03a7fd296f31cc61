mod ingredient;
mod recipe;

pub use ingredient::{
    check_quantity, ComposedIngredient, Consumable, DirectIngredient, Ingredient,
    IngredientField, MealPortions, MealSlot,
};
pub use recipe::{Recipe, RecipeLineItem, RecipeTotals};
