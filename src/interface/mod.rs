pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_amount, prompt_line_items, prompt_new_ingredient, prompt_quantity,
    select_field_action, select_ingredient, select_menu_choice, FieldAction, MenuChoice,
};
pub use render::{display_breakdown, display_ledger, display_recipe, display_recipe_book};
