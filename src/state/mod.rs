mod ledger;
mod persistence;
mod recipe_book;

pub use ledger::Ledger;
pub use persistence::{
    ensure_ledger_file, ensure_recipe_file, format_float, load_ledger, load_recipes, save_ledger,
    save_recipes, LEDGER_HEADERS, RECIPE_HEADERS,
};
pub use recipe_book::{record_recipe, RecipeBook};
