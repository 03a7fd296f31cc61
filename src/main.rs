use clap::Parser;
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use meal_budget_rs::cli::{Cli, Command};
use meal_budget_rs::engine::{compute_totals, update_field};
use meal_budget_rs::error::{MealError, Result};
use meal_budget_rs::interface::{
    display_breakdown, display_ledger, display_recipe, display_recipe_book, prompt_line_items,
    prompt_new_ingredient, prompt_quantity, select_field_action, select_ingredient,
    select_menu_choice, FieldAction, MenuChoice,
};
use meal_budget_rs::models::{Consumable, IngredientField};
use meal_budget_rs::state::{
    ensure_ledger_file, ensure_recipe_file, load_ledger, load_recipes, record_recipe,
    save_ledger, save_recipes, Ledger,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ledger_path = Path::new(&cli.ledger);
    let recipe_path = Path::new(&cli.recipes);

    ensure_ledger_file(ledger_path)?;
    ensure_recipe_file(recipe_path)?;

    match cli.command.unwrap_or_default() {
        Command::Menu => cmd_menu(ledger_path, recipe_path),
        Command::Breakdown { json } => cmd_breakdown(ledger_path, json),
        Command::List => {
            display_ledger(&load_ledger(ledger_path)?);
            Ok(())
        }
        Command::Add => cmd_add(ledger_path),
        Command::Update { name, field, value } => cmd_update(ledger_path, &name, field, value),
        Command::Recipe => {
            let mut ledger = load_ledger(ledger_path)?;
            store_recipe(&mut ledger, ledger_path, recipe_path)
        }
        Command::Recipes => {
            display_recipe_book(&load_recipes(recipe_path)?);
            Ok(())
        }
    }
}

/// Print errors the user can fix and carry on; propagate the rest.
fn report(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "operation rejected");
            println!("{}", e);
            Ok(())
        }
        other => other,
    }
}

/// Interactive loop over the ledger, saving after every change.
fn cmd_menu(ledger_path: &Path, recipe_path: &Path) -> Result<()> {
    let mut ledger = load_ledger(ledger_path)?;
    println!("Loaded {} ingredients", ledger.len());

    loop {
        println!();
        match select_menu_choice()? {
            MenuChoice::Breakdown => display_breakdown(&compute_totals(ledger.ingredients())),
            MenuChoice::Modify => report(modify_ingredients(&mut ledger, ledger_path, recipe_path))?,
            MenuChoice::Add => report(add_ingredient(&mut ledger, ledger_path))?,
            MenuChoice::Recipe => report(store_recipe(&mut ledger, ledger_path, recipe_path))?,
            MenuChoice::Exit => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

fn modify_ingredients(ledger: &mut Ledger, ledger_path: &Path, recipe_path: &Path) -> Result<()> {
    while let Some(name) = select_ingredient(ledger)? {
        loop {
            match select_field_action(&name)? {
                FieldAction::Update(field) => {
                    let value = prompt_quantity(&format!("Enter the new value for {}", field))?;
                    report(set_and_save(ledger, ledger_path, &name, field, value))?;
                }
                FieldAction::StoreRecipe => {
                    store_recipe(ledger, ledger_path, recipe_path)?;
                    break;
                }
                FieldAction::Back => break,
            }
        }
    }
    Ok(())
}

fn set_and_save(
    ledger: &mut Ledger,
    ledger_path: &Path,
    name: &str,
    field: IngredientField,
    value: f64,
) -> Result<()> {
    ledger.set_field(name, field, value)?;
    save_ledger(ledger_path, ledger)?;
    println!("{} updated successfully.", name);
    Ok(())
}

fn add_ingredient(ledger: &mut Ledger, ledger_path: &Path) -> Result<()> {
    let Some(ingredient) = prompt_new_ingredient()? else {
        return Ok(());
    };
    let name = ingredient.name().to_string();
    ledger.insert(ingredient)?;
    save_ledger(ledger_path, ledger)?;
    println!("{} added successfully.", name);
    Ok(())
}

/// Compose a recipe and persist both tables, or neither.
fn store_recipe(ledger: &mut Ledger, ledger_path: &Path, recipe_path: &Path) -> Result<()> {
    let original_book = load_recipes(recipe_path)?;
    let line_items = prompt_line_items()?;

    let mut next_ledger = ledger.clone();
    let mut next_book = original_book.clone();
    let (recipe, projected) = record_recipe(&mut next_ledger, &mut next_book, line_items)?;

    save_recipes(recipe_path, &next_book)?;
    if let Err(e) = save_ledger(ledger_path, &next_ledger) {
        debug!("restoring recipe history after failed ledger save");
        save_recipes(recipe_path, &original_book)?;
        return Err(e);
    }
    *ledger = next_ledger;

    println!("Recipe stored successfully.");
    display_recipe(&recipe);
    println!("{} added to the master food list.", projected.name());
    Ok(())
}

fn cmd_breakdown(ledger_path: &Path, json: bool) -> Result<()> {
    let ledger = load_ledger(ledger_path)?;
    let totals = compute_totals(ledger.ingredients());

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        display_breakdown(&totals);
    }
    Ok(())
}

fn cmd_add(ledger_path: &Path) -> Result<()> {
    let mut ledger = load_ledger(ledger_path)?;
    add_ingredient(&mut ledger, ledger_path)
}

fn cmd_update(ledger_path: &Path, name: &str, field: IngredientField, value: f64) -> Result<()> {
    let ledger = update_field(load_ledger(ledger_path)?, name, field, value)?;
    save_ledger(ledger_path, &ledger)?;

    let updated = ledger
        .get(name)
        .ok_or_else(|| MealError::IngredientNotFound {
            name: name.to_string(),
            suggestion: None,
        })?;
    println!("{}: {} = {}", updated.name(), field, updated.field(field));
    Ok(())
}
