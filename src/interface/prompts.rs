use dialoguer::{Input, Select};

use crate::error::{MealError, Result};
use crate::models::{Ingredient, IngredientField, MealPortions, RecipeLineItem};
use crate::state::Ledger;

/// Top-level choices of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Breakdown,
    Modify,
    Add,
    Recipe,
    Exit,
}

/// What to do with a selected ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    Update(IngredientField),
    StoreRecipe,
    Back,
}

fn parse_number(input: &str) -> Result<f64> {
    input
        .trim()
        .parse()
        .map_err(|_| MealError::InvalidInput(format!("'{}' is not a number", input.trim())))
}

fn prompt_number(prompt: &str, allow_zero: bool) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .validate_with(move |input: &String| -> std::result::Result<(), &'static str> {
            match input.trim().parse::<f64>() {
                Ok(v) if !v.is_finite() => Err("Enter a finite number"),
                Ok(v) if v < 0.0 => Err("Value must not be negative"),
                Ok(v) if v == 0.0 && !allow_zero => Err("Value must be greater than zero"),
                Ok(_) => Ok(()),
                Err(_) => Err("Enter a number"),
            }
        })
        .interact_text()?;

    parse_number(&input)
}

/// Prompt for a non-negative quantity.
pub fn prompt_quantity(prompt: &str) -> Result<f64> {
    prompt_number(prompt, true)
}

/// Prompt for a strictly positive amount.
pub fn prompt_amount(prompt: &str) -> Result<f64> {
    prompt_number(prompt, false)
}

/// Prompt for a name; `None` when the user types the cancel word or nothing.
fn prompt_name(prompt: &str, cancel_word: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case(cancel_word) {
        return Ok(None);
    }
    Ok(Some(input.to_string()))
}

/// Collect a new ingredient. Returns `None` if the user goes back.
pub fn prompt_new_ingredient() -> Result<Option<Ingredient>> {
    let prompt = "Enter the new ingredient name (or type 'back' to go back)";
    let Some(name) = prompt_name(prompt, "back")? else {
        return Ok(None);
    };

    let cost = prompt_quantity("Enter the cost per oz")?;
    let calories = prompt_quantity("Enter the calories per oz")?;
    let breakfast = prompt_quantity("Enter the breakfast amount in oz")?;
    let lunch = prompt_quantity("Enter the lunch amount in oz")?;
    let dinner = prompt_quantity("Enter the dinner amount in oz")?;
    let snack = prompt_quantity("Enter the snack amount in oz")?;

    Ok(Some(Ingredient::direct(
        name,
        cost,
        calories,
        MealPortions::new(breakfast, lunch, dinner, snack),
    )))
}

/// Collect recipe line items until the user types `done`.
pub fn prompt_line_items() -> Result<Vec<RecipeLineItem>> {
    println!("Enter details for the recipe:");
    let mut items = Vec::new();

    while let Some(name) = prompt_name("Enter ingredient name (or 'done' to finish)", "done")? {
        let amount = prompt_amount(&format!("Enter amount of {} in oz", name))?;
        let cost = prompt_quantity(&format!("Enter cost per oz of {}", name))?;
        let calories = prompt_quantity(&format!("Enter calories per oz of {}", name))?;
        items.push(RecipeLineItem::new(name, amount, cost, calories));
    }

    Ok(items)
}

/// Pick the main menu action.
pub fn select_menu_choice() -> Result<MenuChoice> {
    let options = [
        "See complete breakdown",
        "Modify ingredient",
        "Add new ingredient",
        "Calculate and store recipe",
        "Exit",
    ];

    let selection = Select::new()
        .with_prompt("Where do you want to start?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => MenuChoice::Breakdown,
        1 => MenuChoice::Modify,
        2 => MenuChoice::Add,
        3 => MenuChoice::Recipe,
        _ => MenuChoice::Exit,
    })
}

/// Pick an ingredient from the ledger. `None` means go back.
pub fn select_ingredient(ledger: &Ledger) -> Result<Option<String>> {
    if ledger.is_empty() {
        println!("The ledger has no ingredients yet.");
        return Ok(None);
    }

    let mut options: Vec<String> = ledger.names().into_iter().map(str::to_string).collect();
    options.push("Go back".to_string());

    let selection = Select::new()
        .with_prompt("Which ingredient do you want to modify?")
        .items(&options)
        .default(0)
        .interact()?;

    if selection + 1 == options.len() {
        return Ok(None);
    }
    Ok(options.into_iter().nth(selection))
}

/// Pick the field to edit, or one of the extra actions.
pub fn select_field_action(ingredient_name: &str) -> Result<FieldAction> {
    let mut options: Vec<String> = IngredientField::ALL
        .iter()
        .map(|f| f.column().to_string())
        .collect();
    options.push("Calculate and store recipe".to_string());
    options.push("Go back".to_string());

    let selection = Select::new()
        .with_prompt(format!("What do you want to update on '{}'?", ingredient_name))
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match IngredientField::ALL.get(selection) {
        Some(field) => FieldAction::Update(*field),
        None if selection == IngredientField::ALL.len() => FieldAction::StoreRecipe,
        None => FieldAction::Back,
    })
}
