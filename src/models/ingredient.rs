use std::fmt;

use serde::Serialize;

use crate::engine::constants::RECIPE_NAME_PREFIX;
use crate::error::{MealError, Result};

/// One of the four fixed consumption categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ounces eaten per day in each meal slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MealPortions {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snack: f64,
}

impl MealPortions {
    pub fn new(breakfast: f64, lunch: f64, dinner: f64, snack: f64) -> Self {
        Self {
            breakfast,
            lunch,
            dinner,
            snack,
        }
    }

    pub fn get(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snack => self.snack,
        }
    }

    pub fn set(&mut self, slot: MealSlot, oz: f64) {
        match slot {
            MealSlot::Breakfast => self.breakfast = oz,
            MealSlot::Lunch => self.lunch = oz,
            MealSlot::Dinner => self.dinner = oz,
            MealSlot::Snack => self.snack = oz,
        }
    }

    /// Daily weight: breakfast + lunch + dinner + snack.
    #[inline]
    pub fn daily_oz(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// Editable columns of a ledger row.
///
/// The name is the ledger key and is deliberately not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Cost,
    Calories,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl IngredientField {
    pub const ALL: [IngredientField; 6] = [
        IngredientField::Cost,
        IngredientField::Calories,
        IngredientField::Breakfast,
        IngredientField::Lunch,
        IngredientField::Dinner,
        IngredientField::Snack,
    ];

    /// Column header this field is persisted under.
    pub fn column(self) -> &'static str {
        match self {
            IngredientField::Cost => "Cost (Oz)",
            IngredientField::Calories => "≈ Calories (Oz)",
            IngredientField::Breakfast => "Breakfast (Oz)",
            IngredientField::Lunch => "Lunch (Oz)",
            IngredientField::Dinner => "Dinner (Oz)",
            IngredientField::Snack => "Snack (Oz)",
        }
    }

    pub fn meal_slot(self) -> Option<MealSlot> {
        match self {
            IngredientField::Breakfast => Some(MealSlot::Breakfast),
            IngredientField::Lunch => Some(MealSlot::Lunch),
            IngredientField::Dinner => Some(MealSlot::Dinner),
            IngredientField::Snack => Some(MealSlot::Snack),
            IngredientField::Cost | IngredientField::Calories => None,
        }
    }
}

impl fmt::Display for IngredientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl std::str::FromStr for IngredientField {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cost" => Ok(IngredientField::Cost),
            "calories" | "cal" => Ok(IngredientField::Calories),
            "breakfast" => Ok(IngredientField::Breakfast),
            "lunch" => Ok(IngredientField::Lunch),
            "dinner" => Ok(IngredientField::Dinner),
            "snack" => Ok(IngredientField::Snack),
            other => Err(MealError::InvalidInput(format!(
                "unknown field '{}' (expected cost, calories, breakfast, lunch, dinner or snack)",
                other
            ))),
        }
    }
}

/// Read-only view the aggregator needs from any ledger row.
pub trait Consumable {
    fn name(&self) -> &str;
    fn cost_per_oz(&self) -> f64;
    fn calories_per_oz(&self) -> f64;
    fn portions(&self) -> &MealPortions;

    /// Canonical key for lookups (lowercase name).
    fn key(&self) -> String {
        self.name().to_lowercase()
    }
}

/// An ingredient entered by hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectIngredient {
    pub name: String,
    pub cost_per_oz: f64,
    pub calories_per_oz: f64,
    pub portions: MealPortions,
}

/// A virtual ingredient projected from a composed recipe.
///
/// Starts with zero portions in every slot until the user assigns some.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedIngredient {
    pub name: String,
    pub components: Vec<String>,
    pub cost_per_oz: f64,
    pub calories_per_oz: f64,
    pub portions: MealPortions,
}

macro_rules! impl_consumable {
    ($ty:ty) => {
        impl Consumable for $ty {
            fn name(&self) -> &str {
                &self.name
            }
            fn cost_per_oz(&self) -> f64 {
                self.cost_per_oz
            }
            fn calories_per_oz(&self) -> f64 {
                self.calories_per_oz
            }
            fn portions(&self) -> &MealPortions {
                &self.portions
            }
        }
    };
}

impl_consumable!(DirectIngredient);
impl_consumable!(ComposedIngredient);

/// A ledger row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ingredient {
    Direct(DirectIngredient),
    Composed(ComposedIngredient),
}

impl Ingredient {
    pub fn direct(
        name: impl Into<String>,
        cost_per_oz: f64,
        calories_per_oz: f64,
        portions: MealPortions,
    ) -> Self {
        Ingredient::Direct(DirectIngredient {
            name: name.into(),
            cost_per_oz,
            calories_per_oz,
            portions,
        })
    }

    pub fn is_composed(&self) -> bool {
        matches!(self, Ingredient::Composed(_))
    }

    fn consumable(&self) -> &dyn Consumable {
        match self {
            Ingredient::Direct(d) => d,
            Ingredient::Composed(c) => c,
        }
    }

    /// Set one editable field without validating the value.
    pub(crate) fn set_field(&mut self, field: IngredientField, value: f64) {
        let (cost, calories, portions) = match self {
            Ingredient::Direct(d) => (&mut d.cost_per_oz, &mut d.calories_per_oz, &mut d.portions),
            Ingredient::Composed(c) => {
                (&mut c.cost_per_oz, &mut c.calories_per_oz, &mut c.portions)
            }
        };
        match field {
            IngredientField::Cost => *cost = value,
            IngredientField::Calories => *calories = value,
            _ => {
                if let Some(slot) = field.meal_slot() {
                    portions.set(slot, value);
                }
            }
        }
    }

    pub fn field(&self, field: IngredientField) -> f64 {
        match field {
            IngredientField::Cost => self.cost_per_oz(),
            IngredientField::Calories => self.calories_per_oz(),
            _ => field
                .meal_slot()
                .map(|slot| self.portions().get(slot))
                .unwrap_or_default(),
        }
    }

    /// Check the non-empty name and non-negative field invariants.
    ///
    /// The `Recipe: ` prefix is reserved for composed ingredients, which is
    /// how the two variants are told apart in the ledger file.
    pub fn validate(&self) -> Result<()> {
        if self.name().trim().is_empty() {
            return Err(MealError::InvalidRecord(
                "ingredient name must not be empty".to_string(),
            ));
        }
        let prefixed = self.name().starts_with(RECIPE_NAME_PREFIX);
        if prefixed != self.is_composed() {
            return Err(MealError::InvalidRecord(format!(
                "{}: only recipe ingredients may be named '{}…'",
                self.name(),
                RECIPE_NAME_PREFIX
            )));
        }
        for field in IngredientField::ALL {
            check_quantity(self.name(), field.column(), self.field(field))?;
        }
        Ok(())
    }
}

impl Consumable for Ingredient {
    fn name(&self) -> &str {
        self.consumable().name()
    }
    fn cost_per_oz(&self) -> f64 {
        self.consumable().cost_per_oz()
    }
    fn calories_per_oz(&self) -> f64 {
        self.consumable().calories_per_oz()
    }
    fn portions(&self) -> &MealPortions {
        self.consumable().portions()
    }
}

/// Reject negative, NaN and infinite quantities.
pub fn check_quantity(name: &str, column: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MealError::InvalidRecord(format!(
            "{}: {} must be a non-negative number, got {}",
            name, column, value
        )));
    }
    Ok(())
}
