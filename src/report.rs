// Presentation-neutral view of a calculation
//
// Everything a front end needs to show: one line per category, the total,
// bar-chart rows, reduction tips and an optional per-country context note.
// The TUI, the `calc` command and the HTTP API all render from this.

use crate::calculator::EmissionResult;
use crate::factors::Category;
use crate::inputs::RawInputs;
use serde::Serialize;

pub const CHART_TITLE: &str = "Carbon Emissions by Category";
pub const CHART_VALUE_AXIS: &str = "Emissions (tonnes CO2/year)";

/// Per-capita background for countries we have figures for.
pub fn country_context(country: &str) -> Option<&'static str> {
    match country {
        "India" => Some(
            "In 2021, CO2 emissions per capita for India was 1.9 tons of CO2 per capita. \
             Between 1972 and 2021, CO2 emissions per capita of India grew substantially \
             from 0.39 to 1.9 tons of CO2 per capita rising at an increasing annual rate \
             that reached a maximum of 9.41% in 2021",
        ),
        _ => None,
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub category: Category,
    pub label: &'static str,
    pub tonnes: f64,
}

/// One reduction tip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub category: Category,
    pub text: &'static str,
}

/// Result plus everything needed to display it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub country: String,
    pub inputs: RawInputs,
    pub result: EmissionResult,
    pub largest_category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'static str>,
}

impl Report {
    pub fn new(country: impl Into<String>, inputs: RawInputs, result: EmissionResult) -> Self {
        let country = country.into();
        let context = country_context(&country);

        Report {
            largest_category: result.largest_category(),
            country,
            inputs,
            result,
            context,
        }
    }

    /// `"🚗 Transportation: 5.11 tonnes CO2 per year"` for each category.
    pub fn category_lines(&self) -> Vec<String> {
        self.result
            .categories()
            .iter()
            .map(|(category, tonnes)| {
                format!(
                    "{} {}: {} tonnes CO2 per year",
                    category.icon(),
                    category.as_str(),
                    format_tonnes(*tonnes)
                )
            })
            .collect()
    }

    pub fn total_line(&self) -> String {
        format!(
            "🌍 Your total carbon footprint is: {} tonnes CO2 per year",
            format_tonnes(self.result.total)
        )
    }

    pub fn chart_rows(&self) -> Vec<ChartRow> {
        self.result
            .categories()
            .iter()
            .map(|(category, tonnes)| ChartRow {
                category: *category,
                label: category.as_str(),
                tonnes: *tonnes,
            })
            .collect()
    }

    pub fn tips(&self) -> Vec<Tip> {
        Category::ALL
            .iter()
            .map(|category| Tip {
                category: *category,
                text: category.tip(),
            })
            .collect()
    }

    /// Plain-text rendering for the terminal.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Results ({})\n", self.country));
        out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        out.push_str("Carbon Emissions by Category\n");
        for line in self.category_lines() {
            out.push_str(&format!("  {}\n", line));
        }

        out.push_str("\nTotal Carbon Footprint\n");
        out.push_str(&format!("  {}\n", self.total_line()));

        if let Some(context) = self.context {
            out.push_str(&format!("\n  ⚠️  {}\n", context));
        }

        out.push_str("\nTips to Reduce Your Carbon Footprint\n");
        for tip in self.tips() {
            out.push_str(&format!("  - {}: {}\n", tip.category.as_str(), tip.text));
        }

        out
    }
}

/// Shortest form of a 2-decimal value, keeping one decimal: 5.11, 0.5, 20.0.
/// Goes through `{:.2}` so binary noise (`20.029999999999998`) never shows.
pub fn format_tonnes(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    match fixed.strip_suffix('0') {
        Some(short) if !short.ends_with('.') => short.to_string(),
        _ => fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;
    use crate::factors::EmissionFactors;

    fn max_report() -> Report {
        let inputs = RawInputs::maximum();
        Report::new("India", inputs, compute(&inputs, &EmissionFactors::india()))
    }

    #[test]
    fn test_category_lines() {
        let lines = max_report().category_lines();

        assert_eq!(
            lines,
            vec![
                "🚗 Transportation: 5.11 tonnes CO2 per year",
                "💡 Electricity: 9.84 tonnes CO2 per year",
                "🍽️ Diet: 4.56 tonnes CO2 per year",
                "🗑️ Waste: 0.52 tonnes CO2 per year",
            ]
        );
    }

    #[test]
    fn test_total_line() {
        assert_eq!(
            max_report().total_line(),
            "🌍 Your total carbon footprint is: 20.03 tonnes CO2 per year"
        );
    }

    #[test]
    fn test_chart_rows_follow_display_order() {
        let rows = max_report().chart_rows();

        let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Transportation", "Electricity", "Diet", "Waste"]);
        assert_eq!(rows[1].tonnes, max_report().result.electricity);
    }

    #[test]
    fn test_context_only_for_known_countries() {
        assert!(max_report().context.unwrap().contains("1.9 tons"));
        assert!(country_context("Norway").is_none());
    }

    #[test]
    fn test_text_rendering_contains_all_sections() {
        let text = max_report().to_text();

        assert!(text.contains("Results (India)"));
        assert!(text.contains("Waste: 0.52 tonnes"));
        assert!(text.contains("20.03 tonnes CO2 per year"));
        assert!(text.contains("Tips to Reduce Your Carbon Footprint"));
        assert!(text.contains("- Diet: Reduce meat consumption"));
    }

    #[test]
    fn test_zero_result_keeps_one_decimal() {
        let report = Report::new("India", RawInputs::zero(), EmissionResult::zero());

        assert_eq!(report.category_lines()[0], "🚗 Transportation: 0.0 tonnes CO2 per year");
        assert_eq!(
            report.total_line(),
            "🌍 Your total carbon footprint is: 0.0 tonnes CO2 per year"
        );
    }

    #[test]
    fn test_format_tonnes() {
        assert_eq!(format_tonnes(5.11), "5.11");
        assert_eq!(format_tonnes(0.5), "0.5");
        assert_eq!(format_tonnes(20.0), "20.0");
        assert_eq!(format_tonnes(0.0), "0.0");
        assert_eq!(format_tonnes(1.83), "1.83");
        assert_eq!(format_tonnes(20.029999999999998), "20.03");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_value(max_report()).unwrap();

        assert_eq!(json["country"], "India");
        assert_eq!(json["largest_category"], "Electricity");
        assert_eq!(json["inputs"]["meals_per_day"], 10);
        assert!(json["context"].is_string());
    }
}
