use crate::engine::Totals;
use crate::models::{Consumable, MealSlot, Recipe};
use crate::state::{Ledger, RecipeBook};

/// Display the daily breakdown followed by the efficiency ranking.
pub fn display_breakdown(totals: &Totals) {
    println!();
    println!("Daily Cost: ${:.2}", totals.daily_cost);
    println!("Monthly Cost: ${:.2}", totals.monthly_cost());
    println!("Total Calories: {:.2}", totals.total_calories);
    for slot in MealSlot::ALL {
        println!("{} Calories: {:.2}", slot, totals.meal_calories.get(slot));
    }
    if let Ok(per_oz) = totals.average_cost_per_oz() {
        println!("Average Cost per Oz: ${:.2}", per_oz);
    }

    let ranking = totals.ranking();
    if ranking.is_empty() {
        return;
    }

    println!();
    println!("Calories per Cost Ratio (ranked from best to worst):");

    let width = ranking
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(10)
        .max("Ingredient".len());

    println!("{:<width$}  Details", "Ingredient", width = width);
    for row in &ranking {
        println!("{:<width$}  {}", row.name, row.details(), width = width);
    }
    println!();
}

/// Display every ledger row; composed ingredients are tagged.
pub fn display_ledger(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("Ledger: (none)");
        return;
    }

    println!();
    println!("=== Ledger ({} items) ===", ledger.len());
    println!();

    for ingredient in ledger.ingredients() {
        let p = ingredient.portions();
        let tag = if ingredient.is_composed() { "  [recipe]" } else { "" };
        println!(
            "  {} - ${:.2}/oz, {:.1} cal/oz, B:{} L:{} D:{} S:{} oz{}",
            ingredient.name(),
            ingredient.cost_per_oz(),
            ingredient.calories_per_oz(),
            p.breakfast,
            p.lunch,
            p.dinner,
            p.snack,
            tag
        );
    }

    println!();
}

/// Display the totals of one recipe.
pub fn display_recipe(recipe: &Recipe) {
    let t = &recipe.totals;
    println!("Recipe: {}", recipe.ingredient_names().join(", "));
    for item in &recipe.line_items {
        println!(
            "    {:.2} oz {} @ ${:.2}/oz, {:.1} cal/oz",
            item.amount, item.name, item.cost_per_oz, item.calories_per_oz
        );
    }
    println!(
        "  Total Weight: {:.2} oz | Total Cost: ${:.2} | Total Calories: {:.2}",
        t.total_weight, t.total_cost, t.total_calories
    );
    println!(
        "  Cost per Oz: ${:.2} | Calories per Oz: {:.2}",
        t.cost_per_oz, t.calories_per_oz
    );
}

/// Display the whole recipe history.
pub fn display_recipe_book(book: &RecipeBook) {
    if book.is_empty() {
        println!("Recipes: (none)");
        return;
    }

    println!();
    println!("=== Recipes ({} stored) ===", book.len());
    for (i, recipe) in book.recipes().iter().enumerate() {
        println!();
        print!("{:>3}. ", i + 1);
        display_recipe(recipe);
    }
    println!();
}
