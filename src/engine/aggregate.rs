use serde::Serialize;
use tracing::debug;

use crate::engine::constants::{DAYS_PER_MONTH, DAYS_PER_WEEK};
use crate::engine::ranking::{rank_by_efficiency, Efficiency, RankedIngredient};
use crate::error::{MealError, Result};
use crate::models::{Consumable, MealSlot};

/// Derived figures for one ledger row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientTotals {
    pub name: String,
    pub daily_oz: f64,
    pub weekly_oz: f64,
    pub weekly_cost: f64,

    /// Weekly cost amortized back over seven days.
    pub daily_cost: f64,

    /// Calories eaten per day from this ingredient.
    pub total_calories: f64,

    pub efficiency: Efficiency,
}

impl IngredientTotals {
    /// Derive the per-row figures.
    ///
    /// Daily cost goes through the weekly figure and back so that rounding
    /// matches files produced by earlier versions of the tool.
    pub fn from_consumable<C: Consumable + ?Sized>(item: &C) -> Self {
        let daily_oz = item.portions().daily_oz();
        let weekly_oz = daily_oz * DAYS_PER_WEEK;
        let weekly_cost = weekly_oz * item.cost_per_oz();
        let daily_cost = weekly_cost / DAYS_PER_WEEK;
        let total_calories = daily_oz * item.calories_per_oz();

        Self {
            name: item.name().to_string(),
            daily_oz,
            weekly_oz,
            weekly_cost,
            daily_cost,
            total_calories,
            efficiency: Efficiency::of(item.calories_per_oz(), item.cost_per_oz()),
        }
    }
}

/// Calories per day split by meal slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MealCalories {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snack: f64,
}

impl MealCalories {
    pub fn get(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snack => self.snack,
        }
    }

    fn add(&mut self, slot: MealSlot, calories: f64) {
        match slot {
            MealSlot::Breakfast => self.breakfast += calories,
            MealSlot::Lunch => self.lunch += calories,
            MealSlot::Dinner => self.dinner += calories,
            MealSlot::Snack => self.snack += calories,
        }
    }

    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// Daily and weekly breakdown of a whole ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    /// Per-row figures in ledger order.
    pub ingredients: Vec<IngredientTotals>,
    pub daily_cost: f64,
    pub total_calories: f64,
    pub meal_calories: MealCalories,
}

impl Totals {
    pub fn monthly_cost(&self) -> f64 {
        self.daily_cost * DAYS_PER_MONTH
    }

    pub fn weekly_cost(&self) -> f64 {
        self.ingredients.iter().map(|i| i.weekly_cost).sum()
    }

    pub fn total_daily_oz(&self) -> f64 {
        self.ingredients.iter().map(|i| i.daily_oz).sum()
    }

    /// Blended cost of one ounce of the daily diet.
    pub fn average_cost_per_oz(&self) -> Result<f64> {
        let daily_oz = self.total_daily_oz();
        if daily_oz <= 0.0 {
            return Err(MealError::DivisionUndefined(
                "no ingredient has a daily portion, total daily weight is zero".to_string(),
            ));
        }
        Ok(self.daily_cost / daily_oz)
    }

    /// Ingredients ranked by calories per unit cost, best first.
    pub fn ranking(&self) -> Vec<RankedIngredient> {
        rank_by_efficiency(&self.ingredients)
    }
}

/// Compute the daily cost and calorie breakdown of a ledger.
///
/// Pure: the input is only read and nothing is retained between calls.
pub fn compute_totals<C: Consumable>(ledger: &[C]) -> Totals {
    let mut totals = Totals::default();

    for item in ledger {
        let row = IngredientTotals::from_consumable(item);
        totals.daily_cost += row.daily_cost;
        totals.total_calories += row.total_calories;

        for slot in MealSlot::ALL {
            totals
                .meal_calories
                .add(slot, item.portions().get(slot) * item.calories_per_oz());
        }

        totals.ingredients.push(row);
    }

    debug!(
        rows = totals.ingredients.len(),
        daily_cost = totals.daily_cost,
        total_calories = totals.total_calories,
        "computed ledger totals"
    );

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MealPortions};
    use assert_float_eq::{assert_float_absolute_eq, assert_float_relative_eq};

    fn sample_ledger() -> Vec<Ingredient> {
        vec![
            Ingredient::direct("Rice", 0.12, 100.0, MealPortions::new(0.0, 4.0, 6.0, 0.0)),
            Ingredient::direct("Eggs", 0.30, 40.0, MealPortions::new(4.0, 0.0, 0.0, 0.0)),
            Ingredient::direct("Peanuts", 0.20, 160.0, MealPortions::new(0.0, 0.0, 0.0, 2.0)),
        ]
    }

    #[test]
    fn test_per_row_figures() {
        let totals = compute_totals(&sample_ledger());
        let rice = &totals.ingredients[0];

        assert_float_absolute_eq!(rice.daily_oz, 10.0, 1e-12);
        assert_float_absolute_eq!(rice.weekly_oz, 70.0, 1e-12);
        assert_float_absolute_eq!(rice.weekly_cost, 8.4, 1e-9);
        assert_float_absolute_eq!(rice.daily_cost, 1.2, 1e-9);
        assert_float_absolute_eq!(rice.total_calories, 1000.0, 1e-9);
    }

    #[test]
    fn test_aggregates() {
        let totals = compute_totals(&sample_ledger());

        // 1.2 + 1.2 + 0.4
        assert_float_absolute_eq!(totals.daily_cost, 2.8, 1e-9);
        // 1000 + 160 + 320
        assert_float_absolute_eq!(totals.total_calories, 1480.0, 1e-9);
        assert_float_absolute_eq!(totals.meal_calories.breakfast, 160.0, 1e-9);
        assert_float_absolute_eq!(totals.meal_calories.lunch, 400.0, 1e-9);
        assert_float_absolute_eq!(totals.meal_calories.dinner, 600.0, 1e-9);
        assert_float_absolute_eq!(totals.meal_calories.snack, 320.0, 1e-9);
        assert_float_absolute_eq!(totals.monthly_cost(), 84.0, 1e-9);
    }

    #[test]
    fn test_meal_calories_decompose_total() {
        let totals = compute_totals(&sample_ledger());
        assert_float_relative_eq!(totals.total_calories, totals.meal_calories.total(), 1e-9);
    }

    #[test]
    fn test_empty_ledger() {
        let totals = compute_totals::<Ingredient>(&[]);
        assert_eq!(totals.daily_cost, 0.0);
        assert_eq!(totals.total_calories, 0.0);
        assert!(totals.ingredients.is_empty());
        assert!(matches!(
            totals.average_cost_per_oz(),
            Err(MealError::DivisionUndefined(_))
        ));
    }

    #[test]
    fn test_average_cost_per_oz() {
        let totals = compute_totals(&sample_ledger());
        // 2.8 dollars over 16 oz
        assert_float_absolute_eq!(totals.average_cost_per_oz().unwrap(), 0.175, 1e-9);
    }
}
