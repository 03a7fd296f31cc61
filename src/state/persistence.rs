use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::engine::constants::{LIST_SEPARATOR, RECIPE_NAME_PREFIX};
use crate::error::{MealError, Result};
use crate::models::{
    ComposedIngredient, Consumable, DirectIngredient, Ingredient, MealPortions, Recipe,
    RecipeLineItem, RecipeTotals,
};
use crate::state::{Ledger, RecipeBook};

/// Column headers of the ingredient ledger file.
pub const LEDGER_HEADERS: [&str; 7] = [
    "Ingredient(s)",
    "Cost (Oz)",
    "≈ Calories (Oz)",
    "Breakfast (Oz)",
    "Lunch (Oz)",
    "Dinner (Oz)",
    "Snack (Oz)",
];

/// Column headers of the recipe history file.
pub const RECIPE_HEADERS: [&str; 9] = [
    "Ingredient(s)",
    "Amount (Oz)",
    "Cost (Oz)",
    "≈ Calories (Oz)",
    "Total Weight (Oz)",
    "Total Calories",
    "Total Cost",
    "Calories per Oz",
    "Cost per Oz",
];

/// Format a float the way Python's `repr` does: shortest round-trip digits,
/// `.0` on whole numbers, and exponent form (`1e-05`, `1.5e+16`) outside
/// `1e-4 <= |x| < 1e16`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or_default()),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = format!("{}", value);
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn write_float<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_float(*value))
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Ingredient(s)")]
    name: String,

    #[serde(rename = "Cost (Oz)", serialize_with = "write_float")]
    cost_per_oz: f64,

    #[serde(rename = "≈ Calories (Oz)", serialize_with = "write_float")]
    calories_per_oz: f64,

    #[serde(rename = "Breakfast (Oz)", serialize_with = "write_float")]
    breakfast: f64,

    #[serde(rename = "Lunch (Oz)", serialize_with = "write_float")]
    lunch: f64,

    #[serde(rename = "Dinner (Oz)", serialize_with = "write_float")]
    dinner: f64,

    #[serde(rename = "Snack (Oz)", serialize_with = "write_float")]
    snack: f64,
}

impl From<&Ingredient> for LedgerRow {
    fn from(ingredient: &Ingredient) -> Self {
        let portions = ingredient.portions();
        Self {
            name: ingredient.name().to_string(),
            cost_per_oz: ingredient.cost_per_oz(),
            calories_per_oz: ingredient.calories_per_oz(),
            breakfast: portions.breakfast,
            lunch: portions.lunch,
            dinner: portions.dinner,
            snack: portions.snack,
        }
    }
}

impl From<LedgerRow> for Ingredient {
    /// Rows named `Recipe: …` come back as composed ingredients.
    fn from(row: LedgerRow) -> Self {
        let portions = MealPortions::new(row.breakfast, row.lunch, row.dinner, row.snack);
        match row.name.strip_prefix(RECIPE_NAME_PREFIX) {
            Some(rest) => {
                let components = rest.split(LIST_SEPARATOR).map(str::to_string).collect();
                Ingredient::Composed(ComposedIngredient {
                    name: row.name,
                    components,
                    cost_per_oz: row.cost_per_oz,
                    calories_per_oz: row.calories_per_oz,
                    portions,
                })
            }
            None => Ingredient::Direct(DirectIngredient {
                name: row.name,
                cost_per_oz: row.cost_per_oz,
                calories_per_oz: row.calories_per_oz,
                portions,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RecipeRow {
    #[serde(rename = "Ingredient(s)")]
    ingredients: String,

    #[serde(rename = "Amount (Oz)")]
    amounts: String,

    #[serde(rename = "Cost (Oz)")]
    costs: String,

    #[serde(rename = "≈ Calories (Oz)")]
    calories: String,

    #[serde(rename = "Total Weight (Oz)", serialize_with = "write_float")]
    total_weight: f64,

    #[serde(rename = "Total Calories", serialize_with = "write_float")]
    total_calories: f64,

    #[serde(rename = "Total Cost", serialize_with = "write_float")]
    total_cost: f64,

    #[serde(rename = "Calories per Oz", serialize_with = "write_float")]
    calories_per_oz: f64,

    #[serde(rename = "Cost per Oz", serialize_with = "write_float")]
    cost_per_oz: f64,
}

fn join_floats(values: impl Iterator<Item = f64>) -> String {
    values.map(format_float).collect::<Vec<_>>().join(LIST_SEPARATOR)
}

fn split_floats(column: &str, joined: &str, row: usize) -> Result<Vec<f64>> {
    joined
        .split(LIST_SEPARATOR)
        .map(|part| {
            part.trim().parse::<f64>().map_err(|_| {
                MealError::InvalidRecord(format!(
                    "recipe row {}: '{}' in {} is not a number",
                    row, part, column
                ))
            })
        })
        .collect()
}

impl From<&Recipe> for RecipeRow {
    fn from(recipe: &Recipe) -> Self {
        let items = &recipe.line_items;
        Self {
            ingredients: recipe.ingredient_names().join(LIST_SEPARATOR),
            amounts: join_floats(items.iter().map(|i| i.amount)),
            costs: join_floats(items.iter().map(|i| i.cost_per_oz)),
            calories: join_floats(items.iter().map(|i| i.calories_per_oz)),
            total_weight: recipe.totals.total_weight,
            total_calories: recipe.totals.total_calories,
            total_cost: recipe.totals.total_cost,
            calories_per_oz: recipe.totals.calories_per_oz,
            cost_per_oz: recipe.totals.cost_per_oz,
        }
    }
}

impl RecipeRow {
    fn into_recipe(self, row: usize) -> Result<Recipe> {
        let names: Vec<&str> = self.ingredients.split(LIST_SEPARATOR).collect();
        let amounts = split_floats(RECIPE_HEADERS[1], &self.amounts, row)?;
        let costs = split_floats(RECIPE_HEADERS[2], &self.costs, row)?;
        let calories = split_floats(RECIPE_HEADERS[3], &self.calories, row)?;

        if amounts.len() != names.len() || costs.len() != names.len() || calories.len() != names.len() {
            return Err(MealError::InvalidRecord(format!(
                "recipe row {}: {} ingredients but {} amounts, {} costs, {} calorie rates",
                row,
                names.len(),
                amounts.len(),
                costs.len(),
                calories.len()
            )));
        }

        let line_items = names
            .into_iter()
            .zip(amounts)
            .zip(costs)
            .zip(calories)
            .map(|(((name, amount), cost), cal)| RecipeLineItem::new(name, amount, cost, cal))
            .collect();

        Ok(Recipe {
            line_items,
            totals: RecipeTotals {
                total_weight: self.total_weight,
                total_cost: self.total_cost,
                total_calories: self.total_calories,
                cost_per_oz: self.cost_per_oz,
                calories_per_oz: self.calories_per_oz,
            },
        })
    }
}

/// Create a header-only file if `path` does not exist yet.
fn ensure_file(path: &Path, headers: &[&str]) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(headers)?;
    wtr.flush()?;
    info!(path = %path.display(), "created empty table");
    Ok(())
}

pub fn ensure_ledger_file<P: AsRef<Path>>(path: P) -> Result<()> {
    ensure_file(path.as_ref(), &LEDGER_HEADERS)
}

pub fn ensure_recipe_file<P: AsRef<Path>>(path: P) -> Result<()> {
    ensure_file(path.as_ref(), &RECIPE_HEADERS)
}

/// Write the header row followed by one serialized row per record.
fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Load the ingredient ledger from a CSV file.
///
/// Rows are validated; duplicate names keep the last row.
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Ledger> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<LedgerRow>().enumerate() {
        let ingredient = Ingredient::from(result?);
        ingredient.validate().map_err(|e| match e {
            MealError::InvalidRecord(msg) => {
                MealError::InvalidRecord(format!("ledger row {}: {}", idx + 1, msg))
            }
            other => other,
        })?;
        rows.push(ingredient);
    }

    let ledger = Ledger::from_ingredients(rows)?;
    debug!(path = %path.display(), rows = ledger.len(), "loaded ledger");
    Ok(ledger)
}

/// Save the ingredient ledger to a CSV file.
pub fn save_ledger<P: AsRef<Path>>(path: P, ledger: &Ledger) -> Result<()> {
    let path = path.as_ref();
    let rows: Vec<LedgerRow> = ledger.ingredients().iter().map(LedgerRow::from).collect();
    write_rows(path, &LEDGER_HEADERS, &rows)?;
    debug!(path = %path.display(), rows = rows.len(), "saved ledger");
    Ok(())
}

/// Load the recipe history from a CSV file.
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<RecipeBook> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)?;

    let mut recipes = Vec::new();
    for (idx, result) in rdr.deserialize::<RecipeRow>().enumerate() {
        recipes.push(result?.into_recipe(idx + 1)?);
    }

    debug!(path = %path.display(), rows = recipes.len(), "loaded recipe history");
    Ok(RecipeBook::new(recipes))
}

/// Save the recipe history to a CSV file.
pub fn save_recipes<P: AsRef<Path>>(path: P, book: &RecipeBook) -> Result<()> {
    let path = path.as_ref();
    let rows: Vec<RecipeRow> = book.recipes().iter().map(RecipeRow::from).collect();
    write_rows(path, &RECIPE_HEADERS, &rows)?;
    debug!(path = %path.display(), rows = rows.len(), "saved recipe history");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.125), "0.125");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(0.000015), "1.5e-05");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(2.5e120), "2.5e+120");
        assert_eq!(format_float(1e-100), "1e-100");

        for value in [0.00001, 0.000015, 1e16, 2.5e120, 0.123, 7.0] {
            assert_eq!(format_float(value).parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_ingredient_kind_survives_reload() {
        let mut ledger = Ledger::from_ingredients(vec![Ingredient::direct(
            "Toast",
            0.2,
            80.0,
            MealPortions::new(1.0, 0.0, 0.0, 0.0),
        )])
        .unwrap();
        let mut book = RecipeBook::default();
        crate::state::record_recipe(
            &mut ledger,
            &mut book,
            vec![
                RecipeLineItem::new("Toast", 2.0, 0.2, 80.0),
                RecipeLineItem::new("Butter", 0.5, 0.4, 200.0),
            ],
        )
        .unwrap();

        let posing = Ingredient::direct("Recipe: Jam", 0.3, 70.0, MealPortions::default());
        assert!(matches!(ledger.insert(posing), Err(MealError::InvalidRecord(_))));

        let file = NamedTempFile::new().unwrap();
        save_ledger(file.path(), &ledger).unwrap();
        let reloaded = load_ledger(file.path()).unwrap();

        assert_eq!(reloaded, ledger);
        assert!(!reloaded.get("Toast").unwrap().is_composed());
        match reloaded.get("Recipe: Toast, Butter").unwrap() {
            Ingredient::Composed(c) => assert_eq!(c.components, vec!["Toast", "Butter"]),
            other => panic!("expected composed ingredient, got {:?}", other),
        }
    }

    #[test]
    fn test_ensure_creates_header_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("food_data.csv");

        ensure_ledger_file(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Ingredient(s),Cost (Oz),≈ Calories (Oz),Breakfast (Oz),Lunch (Oz),Dinner (Oz),Snack (Oz)\n"
        );
        assert!(load_ledger(&path).unwrap().is_empty());

        // Existing files are left alone
        fs::write(&path, "keep").unwrap();
        ensure_ledger_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");
    }

    #[test]
    fn test_load_ledger_written_by_older_tool() {
        let csv = "Ingredient(s),Cost (Oz),≈ Calories (Oz),Breakfast (Oz),Lunch (Oz),Dinner (Oz),Snack (Oz)\n\
                   Oats,0.25,110.0,3.0,0.0,0.0,0.0\n\
                   \"Recipe: Oats, Milk\",0.15,70.5,0,0,0,0\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let ledger = load_ledger(file.path()).unwrap();
        assert_eq!(ledger.len(), 2);

        let oats = ledger.get("oats").unwrap();
        assert!(!oats.is_composed());
        assert_eq!(oats.portions().breakfast, 3.0);

        match ledger.get("Recipe: Oats, Milk").unwrap() {
            Ingredient::Composed(c) => assert_eq!(c.components, vec!["Oats", "Milk"]),
            other => panic!("expected composed ingredient, got {:?}", other),
        }
    }

    #[test]
    fn test_load_ledger_rejects_negative_row() {
        let csv = "Ingredient(s),Cost (Oz),≈ Calories (Oz),Breakfast (Oz),Lunch (Oz),Dinner (Oz),Snack (Oz)\n\
                   Oats,0.25,110.0,3.0,0.0,0.0,0.0\n\
                   Milk,-0.05,18.0,0.0,0.0,0.0,0.0\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        match load_ledger(file.path()) {
            Err(MealError::InvalidRecord(msg)) => assert!(msg.starts_with("ledger row 2")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_ledger_save_format() {
        let ledger = Ledger::from_ingredients(vec![Ingredient::direct(
            "Rice",
            0.12,
            100.0,
            MealPortions::new(0.0, 4.0, 6.0, 0.5),
        )])
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        save_ledger(file.path(), &ledger).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().nth(1), Some("Rice,0.12,100.0,0.0,4.0,6.0,0.5"));
    }

    #[test]
    fn test_recipe_history_roundtrip() {
        let recipe = crate::engine::build_recipe(vec![
            RecipeLineItem::new("Beans", 8.0, 0.1, 30.0),
            RecipeLineItem::new("Rice", 8.0, 0.12, 100.0),
        ])
        .unwrap();
        let book = RecipeBook::new(vec![recipe]);

        let file = NamedTempFile::new().unwrap();
        save_recipes(file.path(), &book).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let data_line = content.lines().nth(1).unwrap();
        assert!(data_line.starts_with("\"Beans, Rice\",\"8.0, 8.0\",\"0.1, 0.12\",\"30.0, 100.0\",16.0,"));

        let reloaded = load_recipes(file.path()).unwrap();
        assert_eq!(reloaded, book);
    }

    #[test]
    fn test_recipe_row_length_mismatch() {
        let csv = format!(
            "{}\n\"A, B\",1.0,\"0.1, 0.2\",\"10.0, 20.0\",1.0,10.0,0.1,10.0,0.1\n",
            RECIPE_HEADERS.join(",")
        );
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        assert!(matches!(
            load_recipes(file.path()),
            Err(MealError::InvalidRecord(_))
        ));
    }
}
