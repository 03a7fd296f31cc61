use crate::error::Result;
use crate::models::IngredientField;
use crate::state::Ledger;

/// Set one typed field of a ledger row and hand the ledger back.
///
/// On error the ledger is dropped unchanged with the error; callers that
/// want to keep it on failure should use [`Ledger::set_field`].
pub fn update_field(
    mut ledger: Ledger,
    ingredient_name: &str,
    field: IngredientField,
    new_value: f64,
) -> Result<Ledger> {
    ledger.set_field(ingredient_name, field, new_value)?;
    Ok(ledger)
}
