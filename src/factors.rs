// 🏭 Emission Factor Table - static per-country coefficients
//
// One row per country, four coefficients per row:
// - Transportation: kgCO2 per km
// - Electricity:    kgCO2 per kWh
// - Diet:           kgCO2 per meal
// - Waste:          kgCO2 per kg
//
// The table is built once at startup (built-in or loaded from a file)
// and is read-only afterwards.

use crate::error::{CalculatorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Country shipped in the built-in table.
pub const DEFAULT_COUNTRY: &str = "India";

// ============================================================================
// CATEGORY
// ============================================================================

/// The four emission categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Transportation,
    Electricity,
    Diet,
    Waste,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Transportation,
        Category::Electricity,
        Category::Diet,
        Category::Waste,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transportation => "Transportation",
            Category::Electricity => "Electricity",
            Category::Diet => "Diet",
            Category::Waste => "Waste",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Transportation => "🚗",
            Category::Electricity => "💡",
            Category::Diet => "🍽️",
            Category::Waste => "🗑️",
        }
    }

    /// Physical unit the coefficient is expressed per.
    pub fn unit(&self) -> &'static str {
        match self {
            Category::Transportation => "km",
            Category::Electricity => "kWh",
            Category::Diet => "meal",
            Category::Waste => "kg",
        }
    }

    /// Suggestion for reducing emissions in this category.
    pub fn tip(&self) -> &'static str {
        match self {
            Category::Transportation => {
                "Use public transport, carpool, or switch to electric vehicles."
            }
            Category::Electricity => {
                "Opt for energy-efficient appliances, use renewable energy sources."
            }
            Category::Diet => "Reduce meat consumption, opt for plant-based meals.",
            Category::Waste => "Recycle, compost organic waste, reduce single-use plastics.",
        }
    }
}

// ============================================================================
// EMISSION FACTORS
// ============================================================================

/// Per-unit coefficients for one country (kgCO2 per unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub transportation: f64,
    pub electricity: f64,
    pub diet: f64,
    pub waste: f64,
}

impl EmissionFactors {
    pub const fn new(transportation: f64, electricity: f64, diet: f64, waste: f64) -> Self {
        EmissionFactors {
            transportation,
            electricity,
            diet,
            waste,
        }
    }

    /// Reference coefficients for India.
    pub const fn india() -> Self {
        EmissionFactors::new(0.14, 0.82, 1.25, 0.1)
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transportation => self.transportation,
            Category::Electricity => self.electricity,
            Category::Diet => self.diet,
            Category::Waste => self.waste,
        }
    }

    /// Every coefficient must be finite and >= 0.
    pub fn validate(&self, country: &str) -> Result<()> {
        for category in Category::ALL {
            let value = self.get(category);
            if !value.is_finite() || value < 0.0 {
                return Err(CalculatorError::InvalidFactor {
                    country: country.to_string(),
                    field: field_name(category),
                    value,
                });
            }
        }
        Ok(())
    }
}

fn field_name(category: Category) -> &'static str {
    match category {
        Category::Transportation => "transportation",
        Category::Electricity => "electricity",
        Category::Diet => "diet",
        Category::Waste => "waste",
    }
}

// ============================================================================
// FACTOR TABLE
// ============================================================================

/// One CSV row: `country,transportation,electricity,diet,waste`
#[derive(Debug, Deserialize)]
struct FactorRow {
    country: String,
    transportation: f64,
    electricity: f64,
    diet: f64,
    waste: f64,
}

/// Immutable country -> coefficients map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionFactorTable {
    factors: BTreeMap<String, EmissionFactors>,
}

impl EmissionFactorTable {
    /// Table with the built-in countries (currently India only).
    pub fn builtin() -> Self {
        let mut factors = BTreeMap::new();
        factors.insert(DEFAULT_COUNTRY.to_string(), EmissionFactors::india());
        EmissionFactorTable { factors }
    }

    /// Build a table from `(country, factors)` pairs, rejecting bad rows.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, EmissionFactors)>,
    {
        let mut factors = BTreeMap::new();

        for (country, row) in entries {
            let country = country.trim().to_string();
            row.validate(&country)?;

            if factors.insert(country.clone(), row).is_some() {
                return Err(CalculatorError::DuplicateCountry(country));
            }
        }

        if factors.is_empty() {
            return Err(CalculatorError::EmptyTable);
        }

        Ok(EmissionFactorTable { factors })
    }

    /// Parse CSV with header `country,transportation,electricity,diet,waste`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut entries = Vec::new();
        for result in rdr.deserialize() {
            let row: FactorRow = result?;
            entries.push((
                row.country,
                EmissionFactors::new(row.transportation, row.electricity, row.diet, row.waste),
            ));
        }

        Self::from_entries(entries)
    }

    /// Parse a JSON object keyed by country.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, EmissionFactors> = serde_json::from_reader(reader)?;
        Self::from_entries(raw)
    }

    /// Load a table file; `.json` is parsed as JSON, anything else as CSV.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let table = if is_json {
            Self::from_json_reader(file)?
        } else {
            Self::from_csv_reader(file)?
        };

        info!(path = %path.display(), countries = table.len(), "loaded emission factor table");
        Ok(table)
    }

    /// Coefficients for `country`, or `UnknownCountry`.
    pub fn lookup(&self, country: &str) -> Result<&EmissionFactors> {
        self.factors
            .get(country)
            .ok_or_else(|| CalculatorError::unknown_country(country))
    }

    pub fn contains(&self, country: &str) -> bool {
        self.factors.contains_key(country)
    }

    /// Country names in sorted order. Selection UIs offer only these.
    pub fn countries(&self) -> Vec<&str> {
        self.factors.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EmissionFactors)> {
        self.factors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_india_only() {
        let table = EmissionFactorTable::builtin();

        assert_eq!(table.len(), 1);
        assert_eq!(table.countries(), vec!["India"]);

        let india = table.lookup("India").unwrap();
        assert_eq!(india.transportation, 0.14);
        assert_eq!(india.electricity, 0.82);
        assert_eq!(india.diet, 1.25);
        assert_eq!(india.waste, 0.1);
    }

    #[test]
    fn test_lookup_unknown_country() {
        let table = EmissionFactorTable::builtin();

        let err = table.lookup("Unknownland").unwrap_err();
        match err {
            CalculatorError::UnknownCountry { country } => assert_eq!(country, "Unknownland"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = EmissionFactorTable::builtin();
        assert!(table.contains("India"));
        assert!(!table.contains("india"));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "country,transportation,electricity,diet,waste\n\
                   India,0.14,0.82,1.25,0.1\n\
                   Norway, 0.12, 0.02, 1.6, 0.3\n";

        let table = EmissionFactorTable::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.countries(), vec!["India", "Norway"]);
        assert_eq!(table.lookup("Norway").unwrap().electricity, 0.02);
    }

    #[test]
    fn test_from_csv_rejects_negative_factor() {
        let csv = "country,transportation,electricity,diet,waste\n\
                   Broken,0.14,-0.82,1.25,0.1\n";

        let err = EmissionFactorTable::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CalculatorError::InvalidFactor { field: "electricity", .. }
        ));
    }

    #[test]
    fn test_from_csv_rejects_duplicates() {
        let csv = "country,transportation,electricity,diet,waste\n\
                   India,0.14,0.82,1.25,0.1\n\
                   India,0.15,0.82,1.25,0.1\n";

        let err = EmissionFactorTable::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CalculatorError::DuplicateCountry(ref c) if c == "India"));
    }

    #[test]
    fn test_from_csv_rejects_empty_table() {
        let csv = "country,transportation,electricity,diet,waste\n";

        let err = EmissionFactorTable::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CalculatorError::EmptyTable));
    }

    #[test]
    fn test_from_csv_reports_malformed_rows() {
        let csv = "country,transportation,electricity,diet,waste\n\
                   India,lots,0.82,1.25,0.1\n";

        let err = EmissionFactorTable::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CalculatorError::Csv(_)));
    }

    #[test]
    fn test_from_json_reader() {
        let json = r#"{
            "India": {"transportation": 0.14, "electricity": 0.82, "diet": 1.25, "waste": 0.1}
        }"#;

        let table = EmissionFactorTable::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(table, EmissionFactorTable::builtin());
    }

    #[test]
    fn test_from_entries_rejects_nan() {
        let table = EmissionFactorTable::from_entries(vec![(
            "Nowhere".to_string(),
            EmissionFactors::new(f64::NAN, 0.0, 0.0, 0.0),
        )]);
        assert!(matches!(
            table,
            Err(CalculatorError::InvalidFactor { field: "transportation", .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = EmissionFactorTable::load(Path::new("/nonexistent/factors.csv")).unwrap_err();
        assert!(matches!(err, CalculatorError::Io(_)));
    }

    #[test]
    fn test_category_order_and_labels() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(labels, vec!["Transportation", "Electricity", "Diet", "Waste"]);
        assert_eq!(Category::Diet.unit(), "meal");
        assert!(Category::Waste.tip().contains("compost"));
    }
}
