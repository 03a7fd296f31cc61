use tracing::debug;

use crate::engine::constants::{LIST_SEPARATOR, RECIPE_NAME_PREFIX};
use crate::error::{MealError, Result};
use crate::models::{
    check_quantity, ComposedIngredient, Ingredient, MealPortions, Recipe, RecipeLineItem,
    RecipeTotals,
};

/// Validate one line item: non-empty name, positive amount, non-negative rates.
///
/// Names are stored comma-joined in the recipe history, so they may not
/// contain a comma themselves.
pub fn validate_line_item(item: &RecipeLineItem) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(MealError::InvalidRecord(
            "recipe ingredient name must not be empty".to_string(),
        ));
    }
    if item.name.contains(',') {
        return Err(MealError::InvalidRecord(format!(
            "{}: recipe ingredient names may not contain ','",
            item.name
        )));
    }
    if !item.amount.is_finite() || item.amount <= 0.0 {
        return Err(MealError::InvalidRecord(format!(
            "{}: amount must be greater than zero, got {}",
            item.name, item.amount
        )));
    }
    check_quantity(&item.name, "cost per oz", item.cost_per_oz)?;
    check_quantity(&item.name, "calories per oz", item.calories_per_oz)?;
    Ok(())
}

/// Roll a batch of line items into recipe totals.
///
/// Fails with `DivisionUndefined` for an empty batch or zero total weight.
pub fn compose_recipe(line_items: &[RecipeLineItem]) -> Result<RecipeTotals> {
    if line_items.is_empty() {
        return Err(MealError::DivisionUndefined(
            "a recipe needs at least one ingredient".to_string(),
        ));
    }
    for item in line_items {
        validate_line_item(item)?;
    }

    let total_weight: f64 = line_items.iter().map(|i| i.amount).sum();
    let total_cost: f64 = line_items.iter().map(RecipeLineItem::cost).sum();
    let total_calories: f64 = line_items.iter().map(RecipeLineItem::calories).sum();

    if total_weight <= 0.0 {
        return Err(MealError::DivisionUndefined(
            "recipe total weight is zero".to_string(),
        ));
    }

    let totals = RecipeTotals {
        total_weight,
        total_cost,
        total_calories,
        cost_per_oz: total_cost / total_weight,
        calories_per_oz: total_calories / total_weight,
    };

    debug!(
        items = line_items.len(),
        total_weight, total_cost, total_calories, "composed recipe"
    );

    Ok(totals)
}

/// Compose a full recipe-history record.
pub fn build_recipe(line_items: Vec<RecipeLineItem>) -> Result<Recipe> {
    let totals = compose_recipe(&line_items)?;
    Ok(Recipe { line_items, totals })
}

/// Name of the virtual ingredient for a set of recipe ingredients.
pub fn recipe_ingredient_name<S: AsRef<str>>(names: &[S]) -> String {
    let joined: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    format!("{}{}", RECIPE_NAME_PREFIX, joined.join(LIST_SEPARATOR))
}

/// Project a recipe into a ledger row with no meal portions assigned.
pub fn project_recipe(recipe: &Recipe) -> Ingredient {
    let components: Vec<String> = recipe.line_items.iter().map(|i| i.name.clone()).collect();

    Ingredient::Composed(ComposedIngredient {
        name: recipe_ingredient_name(&components),
        components,
        cost_per_oz: recipe.totals.cost_per_oz,
        calories_per_oz: recipe.totals.calories_per_oz,
        portions: MealPortions::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Consumable;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn test_single_item_recipe() {
        let recipe = build_recipe(vec![RecipeLineItem::new("X", 10.0, 2.0, 50.0)]).unwrap();
        let t = recipe.totals;
        assert_eq!(t.total_weight, 10.0);
        assert_eq!(t.total_cost, 20.0);
        assert_eq!(t.total_calories, 500.0);
        assert_eq!(t.cost_per_oz, 2.0);
        assert_eq!(t.calories_per_oz, 50.0);

        let projected = project_recipe(&recipe);
        assert!(projected.is_composed());
        assert_eq!(projected.name(), "Recipe: X");
        assert_eq!(projected.cost_per_oz(), 2.0);
        assert_eq!(projected.calories_per_oz(), 50.0);
        assert_eq!(*projected.portions(), MealPortions::default());
    }

    #[test]
    fn test_multi_item_rates() {
        let items = vec![
            RecipeLineItem::new("Flour", 16.0, 0.05, 100.0),
            RecipeLineItem::new("Butter", 4.0, 0.40, 200.0),
            RecipeLineItem::new("Sugar", 6.0, 0.08, 110.0),
        ];
        let t = compose_recipe(&items).unwrap();

        assert_float_absolute_eq!(t.total_weight, 26.0, 1e-12);
        // 0.8 + 1.6 + 0.48
        assert_float_absolute_eq!(t.total_cost, 2.88, 1e-9);
        // 1600 + 800 + 660
        assert_float_absolute_eq!(t.total_calories, 3060.0, 1e-9);
        assert_float_absolute_eq!(t.cost_per_oz * t.total_weight, t.total_cost, 1e-9);
        assert_float_absolute_eq!(t.calories_per_oz * t.total_weight, t.total_calories, 1e-9);
    }

    #[test]
    fn test_empty_recipe_is_undefined() {
        assert!(matches!(
            compose_recipe(&[]),
            Err(MealError::DivisionUndefined(_))
        ));
    }

    #[test]
    fn test_invalid_line_items() {
        let zero = [RecipeLineItem::new("Water", 0.0, 0.0, 0.0)];
        assert!(matches!(
            compose_recipe(&zero),
            Err(MealError::InvalidRecord(_))
        ));

        let negative = [RecipeLineItem::new("Salt", 1.0, -0.1, 0.0)];
        assert!(matches!(
            compose_recipe(&negative),
            Err(MealError::InvalidRecord(_))
        ));

        let unnamed = [RecipeLineItem::new("", 1.0, 0.1, 0.0)];
        assert!(compose_recipe(&unnamed).is_err());
    }

    #[test]
    fn test_names_with_separator_rejected() {
        let items = [
            RecipeLineItem::new("Salt, kosher", 0.1, 0.05, 0.0),
            RecipeLineItem::new("Rice", 8.0, 0.12, 100.0),
        ];
        match compose_recipe(&items) {
            Err(MealError::InvalidRecord(msg)) => assert!(msg.starts_with("Salt, kosher")),
            other => panic!("unexpected result: {:?}", other),
        }

        let no_space = [RecipeLineItem::new("Salt,kosher", 0.1, 0.05, 0.0)];
        assert!(matches!(
            compose_recipe(&no_space),
            Err(MealError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_recipe_name_joins_components() {
        assert_eq!(
            recipe_ingredient_name(&["A", "B", "C"]),
            "Recipe: A, B, C"
        );
    }
}
