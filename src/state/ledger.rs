use strsim::jaro_winkler;
use tracing::{info, warn};

use crate::engine::constants::FUZZY_MATCH_THRESHOLD;
use crate::error::{MealError, Result};
use crate::models::{check_quantity, Consumable, Ingredient, IngredientField};

/// The ingredient table, in insertion order, keyed by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    ingredients: Vec<Ingredient>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from loaded rows.
    ///
    /// Every row is validated. A repeated name replaces the earlier row's
    /// values at the earlier row's position (last occurrence wins).
    pub fn from_ingredients(rows: Vec<Ingredient>) -> Result<Self> {
        let mut ledger = Self::new();
        for row in rows {
            row.validate()?;
            match ledger.position(row.name()) {
                Some(idx) => {
                    warn!(name = row.name(), "duplicate ingredient, keeping last row");
                    ledger.ingredients[idx] = row;
                }
                None => ledger.ingredients.push(row),
            }
        }
        Ok(ledger)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = name.to_lowercase();
        self.ingredients.iter().position(|i| i.key() == key)
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.position(name).map(|idx| &self.ingredients[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Closest ingredient name by Jaro-Winkler similarity, if any is close enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.ingredients
            .iter()
            .map(|i| (i.name(), jaro_winkler(&i.key(), &needle)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, _)| n)
    }

    fn not_found(&self, name: &str) -> MealError {
        MealError::IngredientNotFound {
            name: name.to_string(),
            suggestion: self.suggest(name).map(str::to_string),
        }
    }

    /// Check that `ingredient` could be appended without mutating anything.
    pub fn check_insert(&self, ingredient: &Ingredient) -> Result<()> {
        ingredient.validate()?;
        if self.contains(ingredient.name()) {
            return Err(MealError::DuplicateIngredient(ingredient.name().to_string()));
        }
        Ok(())
    }

    /// Append a validated ingredient with a fresh name.
    pub fn insert(&mut self, ingredient: Ingredient) -> Result<()> {
        self.check_insert(&ingredient)?;
        info!(
            name = ingredient.name(),
            composed = ingredient.is_composed(),
            "added ingredient"
        );
        self.ingredients.push(ingredient);
        Ok(())
    }

    /// Overwrite one field of an existing ingredient.
    ///
    /// The value is checked before anything changes.
    pub fn set_field(&mut self, name: &str, field: IngredientField, value: f64) -> Result<()> {
        let idx = self.position(name).ok_or_else(|| self.not_found(name))?;
        check_quantity(self.ingredients[idx].name(), field.column(), value)?;

        let ingredient = &mut self.ingredients[idx];
        let previous = ingredient.field(field);
        ingredient.set_field(field, value);
        info!(
            name = ingredient.name(),
            field = field.column(),
            previous,
            value,
            "updated ingredient"
        );
        Ok(())
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name()).collect()
    }

    /// Count of ingredients in the ledger.
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn into_ingredients(self) -> Vec<Ingredient> {
        self.ingredients
    }
}
