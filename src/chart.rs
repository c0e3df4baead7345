//! Renderer-independent chart descriptions built from aggregation results.
//!
//! A [`Chart`] is plain data: titles, category labels, series values and
//! colours. The UI layer turns it into plot items; nothing here draws.

use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::Color32;

use crate::color;
use crate::data::aggregate::{SurvivalByClass, SurvivalBySex, SurvivorsByAgeAndSex};
use crate::data::passenger::{AgeGroup, PassengerClass, FEMALE, MALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

/// One data series. `values` and `value_labels` line up with the chart's
/// categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Color32,
    pub values: Vec<f64>,
    pub value_labels: Vec<String>,
}

/// Horizontal line across a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub categories: Vec<String>,
    /// Per-category colours; overrides the series colour when non-empty.
    pub category_colors: Vec<Color32>,
    pub series: Vec<Series>,
    pub reference: Option<ReferenceLine>,
    /// Upper bound of the value axis, if fixed.
    pub y_max: Option<f64>,
}

// ---------------------------------------------------------------------------
// Chart builders
// ---------------------------------------------------------------------------

/// Pie of survival rates by sex, slices labelled `"female\n(74.2%)"`.
pub fn survival_by_sex_chart(by_sex: &SurvivalBySex) -> Chart {
    let rates = by_sex.rates();
    let categories = rates
        .iter()
        .map(|(sex, rate)| format!("{sex}\n({rate:.1}%)"))
        .collect();
    let shares = pie_slices(&rates.values().copied().collect::<Vec<_>>());

    Chart {
        kind: ChartKind::Pie,
        title: "Survival Rate by Sex - Titanic".into(),
        x_axis: String::new(),
        y_axis: String::new(),
        categories,
        category_colors: color::sex_colors(rates.keys().map(String::as_str)),
        series: vec![Series {
            name: "Survival rate".into(),
            color: Color32::GRAY,
            values: rates.values().copied().collect(),
            value_labels: shares
                .iter()
                .map(|s| format!("{:.1}%", s.share * 100.0))
                .collect(),
        }],
        reference: None,
        y_max: None,
    }
}

/// Grouped bars of survivor counts per age group, one series per sex
/// (men first, then women, then any other category).
pub fn survivors_by_age_chart(by_age: &SurvivorsByAgeAndSex) -> Chart {
    let mut sexes: Vec<&str> = vec![MALE, FEMALE];
    sexes.extend(
        by_age
            .counts
            .keys()
            .map(String::as_str)
            .filter(|s| *s != MALE && *s != FEMALE),
    );
    let colors = color::sex_colors(sexes.iter().copied());

    let series = sexes
        .iter()
        .zip(colors)
        .map(|(sex, color)| {
            let counts = by_age.counts_for(sex);
            Series {
                name: series_name(sex),
                color,
                values: counts.iter().map(|&c| c as f64).collect(),
                value_labels: counts.iter().map(usize::to_string).collect(),
            }
        })
        .collect();

    Chart {
        kind: ChartKind::Bar,
        title: "Titanic Survivors by Sex and Age Group".into(),
        x_axis: "Age Group".into(),
        y_axis: "Number of Survivors".into(),
        categories: AgeGroup::ALL.iter().map(|g| g.label().to_string()).collect(),
        category_colors: Vec::new(),
        series,
        reference: None,
        y_max: None,
    }
}

/// Bars of survival rate per class labelled `"62.9%\n(136/216)"`, with the
/// overall rate as a dashed reference line.
pub fn survival_by_class_chart(by_class: &SurvivalByClass) -> Chart {
    let stats: Vec<_> = PassengerClass::ALL
        .iter()
        .map(|&c| by_class.class(c))
        .collect();
    let overall = by_class.overall_rate();

    Chart {
        kind: ChartKind::Bar,
        title: "Survival Rate by Class - Titanic".into(),
        x_axis: "Passenger Class".into(),
        y_axis: "Survival Rate (%)".into(),
        categories: PassengerClass::ALL
            .iter()
            .map(|c| c.label().to_string())
            .collect(),
        category_colors: PassengerClass::ALL.iter().map(|&c| color::class_color(c)).collect(),
        series: vec![Series {
            name: "Survival rate".into(),
            color: Color32::GRAY,
            values: stats.iter().map(|s| s.rate()).collect(),
            value_labels: stats
                .iter()
                .map(|s| format!("{:.1}%\n({}/{})", s.rate(), s.survivors, s.total))
                .collect(),
        }],
        reference: Some(ReferenceLine {
            value: overall,
            label: format!("Overall Rate: {overall:.1}%"),
            color: color::reference_line(),
        }),
        y_max: Some(by_class.max_rate() + 15.0),
    }
}

fn series_name(sex: &str) -> String {
    match sex {
        MALE => "Men".into(),
        FEMALE => "Women".into(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Angular extent of one pie slice, in radians, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub start: f64,
    pub sweep: f64,
    /// Fraction of the whole pie, `0..=1`.
    pub share: f64,
}

impl PieSlice {
    /// Angle through the middle of the slice, for label placement.
    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Split a full circle proportionally to `values`, starting at 12 o'clock.
/// An all-zero input yields empty slices.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    let mut start = FRAC_PI_2;
    values
        .iter()
        .map(|&v| {
            let share = if total > 0.0 { v.max(0.0) / total } else { 0.0 };
            let slice = PieSlice {
                start,
                sweep: share * TAU,
                share,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::aggregate::GroupStats;

    fn by_sex() -> SurvivalBySex {
        SurvivalBySex {
            groups: BTreeMap::from([
                (FEMALE.to_string(), GroupStats { survivors: 3, total: 4 }),
                (MALE.to_string(), GroupStats { survivors: 1, total: 4 }),
            ]),
        }
    }

    #[test]
    fn pie_slices_cover_the_circle() {
        let slices = pie_slices(&[75.0, 25.0]);
        assert!((slices[0].share - 0.75).abs() < 1e-12);
        assert!((slices[0].start - FRAC_PI_2).abs() < 1e-12);
        let swept: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((swept - TAU).abs() < 1e-9);
        assert!((slices[1].start - (slices[0].start + slices[0].sweep)).abs() < 1e-12);
    }

    #[test]
    fn all_zero_pie_is_empty() {
        let slices = pie_slices(&[0.0, 0.0]);
        assert!(slices.iter().all(|s| s.sweep == 0.0 && s.share == 0.0));
    }

    #[test]
    fn sex_pie_labels_rates_and_shares() {
        let chart = survival_by_sex_chart(&by_sex());
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.categories, vec!["female\n(75.0%)", "male\n(25.0%)"]);
        assert_eq!(chart.series[0].values, vec![75.0, 25.0]);
        assert_eq!(chart.series[0].value_labels, vec!["75.0%", "25.0%"]);
        assert_eq!(chart.category_colors.len(), 2);
    }

    #[test]
    fn age_chart_has_men_then_women() {
        let by_age = SurvivorsByAgeAndSex {
            counts: BTreeMap::from([
                (FEMALE.to_string(), [1, 2, 3, 4, 5]),
                (MALE.to_string(), [0; 5]),
            ]),
        };
        let chart = survivors_by_age_chart(&by_age);
        assert_eq!(chart.categories, vec!["0-17", "18-29", "30-44", "45-59", "60+"]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Men");
        assert_eq!(chart.series[0].values, vec![0.0; 5]);
        assert_eq!(chart.series[1].name, "Women");
        assert_eq!(chart.series[1].value_labels, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn class_chart_has_reference_line_and_headroom() {
        let by_class = SurvivalByClass {
            classes: BTreeMap::from([
                (PassengerClass::First, GroupStats { survivors: 2, total: 2 }),
                (PassengerClass::Second, GroupStats::default()),
                (PassengerClass::Third, GroupStats { survivors: 0, total: 1 }),
            ]),
            overall: GroupStats { survivors: 2, total: 3 },
        };
        let chart = survival_by_class_chart(&by_class);
        assert_eq!(chart.series[0].values, vec![100.0, 0.0, 0.0]);
        assert_eq!(
            chart.series[0].value_labels,
            vec!["100.0%\n(2/2)", "0.0%\n(0/0)", "0.0%\n(0/1)"]
        );
        let reference = chart.reference.unwrap();
        assert_eq!(reference.label, "Overall Rate: 66.7%");
        assert_eq!(chart.y_max, Some(115.0));
        assert_eq!(chart.category_colors[0], color::class_color(PassengerClass::First));
    }
}
