// 🌍 Emission Calculator - inputs → yearly quantities → tonnes CO2/year
//
// 1. Annualize each raw quantity (days, months, weeks per year)
// 2. Multiply by the country's coefficient (kgCO2/year)
// 3. kg → tonnes, round each category to 2 decimals (half-up)
// 4. Total = rounded sum of the ROUNDED categories
//
// Step 4 sums already-rounded values. Summing the raw values first can
// give a total that differs by up to ~0.02.

use crate::error::Result;
use crate::factors::{Category, EmissionFactorTable, EmissionFactors};
use crate::inputs::RawInputs;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const KG_PER_TONNE: f64 = 1000.0;

/// Decimal round-half-up: a value that reads as x.xx5 rounds up.
///
/// 1.825 is stored as 1.82499999..., so the scaled value is nudged up by a
/// few ulps before rounding. Non-negative inputs only.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale * (1.0 + 4.0 * f64::EPSILON)).round() / scale
}

fn to_tonnes(kg: f64) -> f64 {
    round_half_up(kg / KG_PER_TONNE, 2)
}

// ============================================================================
// ANNUAL QUANTITIES
// ============================================================================

/// Raw inputs scaled to one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualQuantities {
    pub distance_km: f64,
    pub electricity_kwh: f64,
    pub meals: f64,
    pub waste_kg: f64,
}

pub fn annualize(inputs: &RawInputs) -> AnnualQuantities {
    AnnualQuantities {
        distance_km: inputs.distance_km_per_day * DAYS_PER_YEAR,
        electricity_kwh: inputs.electricity_kwh_per_month * MONTHS_PER_YEAR,
        meals: f64::from(inputs.meals_per_day) * DAYS_PER_YEAR,
        waste_kg: inputs.waste_kg_per_week * WEEKS_PER_YEAR,
    }
}

// ============================================================================
// EMISSION RESULT
// ============================================================================

/// Category totals and grand total, tonnes CO2/year, 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub transportation: f64,
    pub electricity: f64,
    pub diet: f64,
    pub waste: f64,
    pub total: f64,
}

impl EmissionResult {
    pub fn zero() -> Self {
        EmissionResult {
            transportation: 0.0,
            electricity: 0.0,
            diet: 0.0,
            waste: 0.0,
            total: 0.0,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transportation => self.transportation,
            Category::Electricity => self.electricity,
            Category::Diet => self.diet,
            Category::Waste => self.waste,
        }
    }

    /// `(category, tonnes)` in display order.
    pub fn categories(&self) -> [(Category, f64); 4] {
        Category::ALL.map(|c| (c, self.get(c)))
    }

    /// Category with the largest share; first in display order on ties.
    pub fn largest_category(&self) -> Category {
        let mut largest = Category::Transportation;
        for category in Category::ALL {
            if self.get(category) > self.get(largest) {
                largest = category;
            }
        }
        largest
    }
}

// ============================================================================
// COMPUTE
// ============================================================================

/// Pure calculation of yearly emissions for one set of inputs.
pub fn compute(inputs: &RawInputs, factors: &EmissionFactors) -> EmissionResult {
    let annual = annualize(inputs);

    let transportation = to_tonnes(factors.transportation * annual.distance_km);
    let electricity = to_tonnes(factors.electricity * annual.electricity_kwh);
    let diet = to_tonnes(factors.diet * annual.meals);
    let waste = to_tonnes(factors.waste * annual.waste_kg);

    let total = round_half_up(transportation + electricity + diet + waste, 2);

    debug!(
        transportation,
        electricity,
        diet,
        waste,
        total,
        "computed emissions"
    );

    EmissionResult {
        transportation,
        electricity,
        diet,
        waste,
        total,
    }
}

/// Look up `country` and compute. Propagates `UnknownCountry`.
pub fn compute_for_country(
    table: &EmissionFactorTable,
    country: &str,
    inputs: &RawInputs,
) -> Result<EmissionResult> {
    let factors = table.lookup(country)?;
    Ok(compute(inputs, factors))
}

// ============================================================================
// TESTS
// ============================================================================
