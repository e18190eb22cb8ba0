// Raw user inputs and their declared ranges
//
// The calculator trusts its inputs. Keeping them in range is the job of
// whatever collects them (TUI fields, CLI flags, HTTP bodies), and this
// module gives those collectors one shared definition of the bounds.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

// ============================================================================
// FIELD BOUNDS
// ============================================================================

/// Range, default and step for one numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl Bounds {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The four inputs in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Distance,
    Electricity,
    Waste,
    Meals,
}

impl InputField {
    pub const ALL: [InputField; 4] = [
        InputField::Distance,
        InputField::Electricity,
        InputField::Waste,
        InputField::Meals,
    ];

    pub fn bounds(&self) -> Bounds {
        match self {
            InputField::Distance => Bounds { min: 0.0, max: 100.0, default: 10.0, step: 0.5 },
            InputField::Electricity => Bounds { min: 0.0, max: 1000.0, default: 100.0, step: 10.0 },
            InputField::Waste => Bounds { min: 0.0, max: 100.0, default: 10.0, step: 0.5 },
            InputField::Meals => Bounds { min: 0.0, max: 10.0, default: 3.0, step: 1.0 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputField::Distance => "Daily commute distance (in km)",
            InputField::Electricity => "Monthly electricity consumption (in kWh)",
            InputField::Waste => "Waste generated per week (in kg)",
            InputField::Meals => "Number of meals per day",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            InputField::Distance => "km/day",
            InputField::Electricity => "kWh/month",
            InputField::Waste => "kg/week",
            InputField::Meals => "meals/day",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            InputField::Distance => InputField::Electricity,
            InputField::Electricity => InputField::Waste,
            InputField::Waste => InputField::Meals,
            InputField::Meals => InputField::Distance,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            InputField::Distance => InputField::Meals,
            InputField::Electricity => InputField::Distance,
            InputField::Waste => InputField::Electricity,
            InputField::Meals => InputField::Waste,
        }
    }
}

// ============================================================================
// RAW INPUTS
// ============================================================================

/// Per-period quantities as the user enters them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// km per day, 0-100
    pub distance_km_per_day: f64,
    /// kWh per month, 0-1000
    pub electricity_kwh_per_month: f64,
    /// kg per week, 0-100
    pub waste_kg_per_week: f64,
    /// meals per day, 0-10
    #[serde(deserialize_with = "deserialize_meals")]
    pub meals_per_day: u8,
}

/// Meals arrive as any integer and are clamped like the float fields.
/// Fractional counts are still rejected.
fn deserialize_meals<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    let max = InputField::Meals.bounds().max as i64;
    let clamped = raw.clamp(0, max);

    if clamped != raw {
        warn!(before = raw, after = clamped, "meals per day outside declared range was clamped");
    }
    Ok(clamped as u8)
}

impl RawInputs {
    pub fn new(distance: f64, electricity: f64, waste: f64, meals: u8) -> Self {
        RawInputs {
            distance_km_per_day: distance,
            electricity_kwh_per_month: electricity,
            waste_kg_per_week: waste,
            meals_per_day: meals,
        }
    }

    pub fn zero() -> Self {
        RawInputs::new(0.0, 0.0, 0.0, 0)
    }

    /// Upper end of every range.
    pub fn maximum() -> Self {
        RawInputs::new(
            InputField::Distance.bounds().max,
            InputField::Electricity.bounds().max,
            InputField::Waste.bounds().max,
            InputField::Meals.bounds().max as u8,
        )
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Distance => self.distance_km_per_day,
            InputField::Electricity => self.electricity_kwh_per_month,
            InputField::Waste => self.waste_kg_per_week,
            InputField::Meals => f64::from(self.meals_per_day),
        }
    }

    /// Set one field, clamped into its range.
    pub fn set(&mut self, field: InputField, value: f64) {
        let value = field.bounds().clamp(value);
        match field {
            InputField::Distance => self.distance_km_per_day = value,
            InputField::Electricity => self.electricity_kwh_per_month = value,
            InputField::Waste => self.waste_kg_per_week = value,
            InputField::Meals => self.meals_per_day = value.round() as u8,
        }
    }

    /// Move one field by `steps` increments of its step size.
    pub fn adjust(&mut self, field: InputField, steps: i32) {
        let step = field.bounds().step;
        let value = self.get(field) + step * f64::from(steps);
        self.set(field, value);
    }

    pub fn is_within_bounds(&self) -> bool {
        InputField::ALL
            .iter()
            .all(|field| field.bounds().contains(self.get(*field)))
    }

    /// Copy with every field pulled into range.
    pub fn clamped(&self) -> Self {
        let mut clamped = *self;
        for field in InputField::ALL {
            clamped.set(field, self.get(field));
        }

        if clamped != *self {
            warn!(before = ?self, after = ?clamped, "inputs outside declared ranges were clamped");
        }
        clamped
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        RawInputs::new(
            InputField::Distance.bounds().default,
            InputField::Electricity.bounds().default,
            InputField::Waste.bounds().default,
            InputField::Meals.bounds().default as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let inputs = RawInputs::default();
        assert_eq!(inputs, RawInputs::new(10.0, 100.0, 10.0, 3));
        assert!(inputs.is_within_bounds());
    }

    #[test]
    fn test_maximum() {
        assert_eq!(RawInputs::maximum(), RawInputs::new(100.0, 1000.0, 100.0, 10));
    }

    #[test]
    fn test_clamped_pulls_values_into_range() {
        let inputs = RawInputs::new(-5.0, 2500.0, 50.0, 42);
        assert!(!inputs.is_within_bounds());

        let clamped = inputs.clamped();
        assert_eq!(clamped, RawInputs::new(0.0, 1000.0, 50.0, 10));
        assert!(clamped.is_within_bounds());
    }

    #[test]
    fn test_clamped_replaces_nan_with_minimum() {
        let clamped = RawInputs::new(f64::NAN, 10.0, 10.0, 3).clamped();
        assert_eq!(clamped.distance_km_per_day, 0.0);
    }

    #[test]
    fn test_clamped_is_identity_inside_range() {
        let inputs = RawInputs::new(12.5, 240.0, 7.25, 2);
        assert_eq!(inputs.clamped(), inputs);
    }

    #[test]
    fn test_adjust_steps_and_stops_at_bounds() {
        let mut inputs = RawInputs::default();

        inputs.adjust(InputField::Distance, 2);
        assert_eq!(inputs.distance_km_per_day, 11.0);

        inputs.adjust(InputField::Meals, -10);
        assert_eq!(inputs.meals_per_day, 0);

        inputs.adjust(InputField::Electricity, 1000);
        assert_eq!(inputs.electricity_kwh_per_month, 1000.0);
    }

    #[test]
    fn test_field_cycle() {
        let mut field = InputField::Distance;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, InputField::Distance);
        assert_eq!(InputField::Distance.previous(), InputField::Meals);
    }

    #[test]
    fn test_deserialize_clamps_out_of_range_meals() {
        let parse = |meals: &str| {
            let json = format!(
                r#"{{"distance_km_per_day":1,"electricity_kwh_per_month":1,
                    "waste_kg_per_week":1,"meals_per_day":{meals}}}"#
            );
            serde_json::from_str::<RawInputs>(&json).unwrap().meals_per_day
        };

        assert_eq!(parse("-1"), 0);
        assert_eq!(parse("300"), 10);
        assert_eq!(parse("4"), 4);
    }

    #[test]
    fn test_deserialize_rejects_fractional_meals() {
        let json = r#"{"distance_km_per_day":1,"electricity_kwh_per_month":1,
                       "waste_kg_per_week":1,"meals_per_day":2.5}"#;
        assert!(serde_json::from_str::<RawInputs>(json).is_err());
    }
}
