use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::engine::aggregate::IngredientTotals;

/// Calories bought per unit of cost.
///
/// A zero cost has no finite ratio; it is kept as `Unbounded` ("free
/// calories") and outranks every finite ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Efficiency {
    Finite(f64),
    Unbounded,
}

impl Efficiency {
    pub fn of(calories_per_oz: f64, cost_per_oz: f64) -> Self {
        if cost_per_oz == 0.0 {
            Efficiency::Unbounded
        } else {
            Efficiency::Finite(calories_per_oz / cost_per_oz)
        }
    }

    /// Ratio as a float, `f64::INFINITY` when unbounded.
    pub fn value(self) -> f64 {
        match self {
            Efficiency::Finite(v) => v,
            Efficiency::Unbounded => f64::INFINITY,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Efficiency::Unbounded)
    }

    /// Total order with `Unbounded` above every finite ratio.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Efficiency::Unbounded, Efficiency::Unbounded) => Ordering::Equal,
            (Efficiency::Unbounded, Efficiency::Finite(_)) => Ordering::Greater,
            (Efficiency::Finite(_), Efficiency::Unbounded) => Ordering::Less,
            (Efficiency::Finite(a), Efficiency::Finite(b)) => a.total_cmp(b),
        }
    }
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Efficiency::Finite(v) => write!(f, "{:.2}", v),
            Efficiency::Unbounded => f.write_str("inf"),
        }
    }
}

/// One line of the efficiency ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedIngredient {
    pub name: String,
    pub efficiency: Efficiency,
    pub daily_oz: f64,
}

impl RankedIngredient {
    /// Ratio paired with its context, e.g. `12.50 (3.00 oz/day)`.
    pub fn details(&self) -> String {
        format!("{} ({:.2} oz/day)", self.efficiency, self.daily_oz)
    }
}

/// Sort ingredients by efficiency, best first.
///
/// The sort is stable: equal ratios keep their ledger order.
pub fn rank_by_efficiency(rows: &[IngredientTotals]) -> Vec<RankedIngredient> {
    let mut ranked: Vec<RankedIngredient> = rows
        .iter()
        .map(|row| RankedIngredient {
            name: row.name.clone(),
            efficiency: row.efficiency,
            daily_oz: row.daily_oz,
        })
        .collect();

    ranked.sort_by(|a, b| b.efficiency.rank_cmp(&a.efficiency));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::compute_totals;
    use crate::models::{Ingredient, MealPortions};

    fn names(ranked: &[RankedIngredient]) -> Vec<&str> {
        ranked.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_efficiency_of() {
        assert_eq!(Efficiency::of(100.0, 0.5), Efficiency::Finite(200.0));
        assert_eq!(Efficiency::of(100.0, 0.0), Efficiency::Unbounded);
        assert_eq!(Efficiency::Unbounded.value(), f64::INFINITY);
    }

    #[test]
    fn test_ranking_descending_with_free_first() {
        let ledger = vec![
            Ingredient::direct("Cheap", 0.1, 50.0, MealPortions::new(1.0, 0.0, 0.0, 0.0)),
            Ingredient::direct("Pricey", 2.0, 50.0, MealPortions::default()),
            Ingredient::direct("Garden", 0.0, 10.0, MealPortions::default()),
            Ingredient::direct("Middle", 0.5, 50.0, MealPortions::default()),
        ];
        let ranked = compute_totals(&ledger).ranking();
        assert_eq!(names(&ranked), vec!["Garden", "Cheap", "Middle", "Pricey"]);
    }

    #[test]
    fn test_ranking_ties_keep_ledger_order() {
        let ledger = vec![
            Ingredient::direct("First", 1.0, 100.0, MealPortions::default()),
            Ingredient::direct("Best", 0.5, 100.0, MealPortions::default()),
            Ingredient::direct("Second", 2.0, 200.0, MealPortions::default()),
            Ingredient::direct("Free A", 0.0, 1.0, MealPortions::default()),
            Ingredient::direct("Free B", 0.0, 5.0, MealPortions::default()),
        ];
        let ranked = compute_totals(&ledger).ranking();
        assert_eq!(
            names(&ranked),
            vec!["Free A", "Free B", "Best", "First", "Second"]
        );
    }

    #[test]
    fn test_details_format() {
        let row = RankedIngredient {
            name: "Oats".to_string(),
            efficiency: Efficiency::Finite(440.0),
            daily_oz: 3.0,
        };
        assert_eq!(row.details(), "440.00 (3.00 oz/day)");

        let free = RankedIngredient {
            name: "Garden".to_string(),
            efficiency: Efficiency::Unbounded,
            daily_oz: 0.5,
        };
        assert_eq!(free.details(), "inf (0.50 oz/day)");
    }
}
