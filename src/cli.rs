use clap::{ArgAction, Parser, Subcommand};

use crate::models::IngredientField;

/// meal_budget: track what your meals cost and how many calories they bring.
#[derive(Parser, Debug)]
#[command(name = "meal_budget")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the ingredient ledger CSV file.
    #[arg(short, long, default_value = "food_data.csv")]
    pub ledger: String,

    /// Path to the recipe history CSV file.
    #[arg(short, long, default_value = "recipe_data.csv")]
    pub recipes: String,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Interactive menu (default).
    #[default]
    Menu,

    /// Show the daily cost and calorie breakdown.
    Breakdown {
        /// Print the totals as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List every ingredient in the ledger.
    List,

    /// Add a new ingredient interactively.
    Add,

    /// Set one field of an ingredient.
    Update {
        /// Ingredient name (case-insensitive).
        name: String,

        /// Field to set: cost, calories, breakfast, lunch, dinner or snack.
        #[arg(value_parser = parse_field)]
        field: IngredientField,

        /// New non-negative value.
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },

    /// Compose a recipe interactively and add it to the ledger.
    Recipe,

    /// List the recipe history.
    Recipes,
}

fn parse_field(s: &str) -> Result<IngredientField, String> {
    s.parse().map_err(|e: crate::error::MealError| e.to_string())
}

impl Cli {
    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
