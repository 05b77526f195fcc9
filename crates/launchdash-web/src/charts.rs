//! View composer: turns aggregation results into chart specifications.
//!
//! Specs are plain data so they can be compared in tests; `to_figure` renders
//! them as Plotly figure JSON (`{ data, layout }`) for the page.

use serde::Serialize;
use serde_json::{json, Value};

use launchdash_common::ScatterColor;
use launchdash_data::{LaunchRecord, Outcome, SiteSuccessSummary};

pub const OVERVIEW_PIE_TITLE: &str = "Success Percentage for Each Launch Site";
pub const SCATTER_TITLE: &str = "Payload vs. Launch Success";
pub const PAYLOAD_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_LABEL: &str = "Launch Outcome";
pub const SITE_LABEL: &str = "Launch Site";
pub const PERCENTAGE_LABEL: &str = "Success Percentage";
pub const BOOSTER_CATEGORY_LABEL: &str = "Booster Version Category";

/// Outcome palette. Only used when points are colored by outcome.
pub const FAILURE_COLOR: &str = "red";
pub const SUCCESS_COLOR: &str = "green";

/// Qualitative palette for booster categories, assigned in first-appearance order.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A",
    "#19D3F3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52",
];

pub fn color_for_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Failure => FAILURE_COLOR,
        Outcome::Success => SUCCESS_COLOR,
    }
}

// ── Pie ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub title: String,
    pub names_label: String,
    pub values_label: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    pub fn to_figure(&self) -> Value {
        let labels: Vec<&str> = self.slices.iter().map(|s| s.label.as_str()).collect();
        let values: Vec<f64> = self.slices.iter().map(|s| s.value).collect();
        json!({
            "data": [{
                "type": "pie",
                "labels": labels,
                "values": values,
                "sort": false,
                "hovertemplate": format!(
                    "{}=%{{label}}<br>{}=%{{value}}<extra></extra>",
                    self.names_label, self.values_label
                ),
            }],
            "layout": {
                "title": { "text": self.title },
                "legend": { "traceorder": "normal" },
            },
        })
    }
}

/// One slice per site, sized by that site's success percentage.
///
/// This shows each site's share of the summed success rates, not its share of
/// total successful launches.
pub fn build_overview_pie(summaries: &[SiteSuccessSummary]) -> PieSpec {
    PieSpec {
        title: OVERVIEW_PIE_TITLE.to_string(),
        names_label: SITE_LABEL.to_string(),
        values_label: PERCENTAGE_LABEL.to_string(),
        slices: summaries
            .iter()
            .map(|s| PieSlice { label: s.site.clone(), value: s.success_percentage() })
            .collect(),
    }
}

/// Failure and success slices for one site, as percentages summing to 100.
pub fn build_site_pie(summary: &SiteSuccessSummary) -> PieSpec {
    let success = summary.success_percentage();
    PieSpec {
        title: format!("Launch Success/Failure Distribution for {}", summary.site),
        names_label: OUTCOME_LABEL.to_string(),
        values_label: PERCENTAGE_LABEL.to_string(),
        slices: vec![
            PieSlice { label: Outcome::Failure.label().to_string(), value: 100.0 - success },
            PieSlice { label: Outcome::Success.label().to_string(), value: success },
        ],
    }
}

// ── Scatter ───────────────────────────────────────────────────────────────────

/// What the scatter points are colored by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorKey {
    #[default]
    BoosterCategory,
    Outcome,
}

impl From<ScatterColor> for ColorKey {
    fn from(value: ScatterColor) -> Self {
        match value {
            ScatterColor::BoosterCategory => ColorKey::BoosterCategory,
            ScatterColor::Outcome => ColorKey::Outcome,
        }
    }
}

impl ColorKey {
    pub fn legend_title(self) -> &'static str {
        match self {
            ColorKey::BoosterCategory => BOOSTER_CATEGORY_LABEL,
            ColorKey::Outcome => OUTCOME_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_key: ColorKey,
    /// y-axis category order, bottom to top
    pub category_order: Vec<String>,
    pub series: Vec<ScatterSeries>,
}

impl ScatterSpec {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn to_figure(&self) -> Value {
        let data: Vec<Value> = self
            .series
            .iter()
            .map(|series| {
                let x: Vec<f64> = series.points.iter().map(|p| p.payload_mass_kg).collect();
                let y: Vec<&str> = series.points.iter().map(|p| p.outcome.label()).collect();
                let text: Vec<&str> = series.points.iter().map(|p| p.hover.as_str()).collect();
                json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": series.name,
                    "x": x,
                    "y": y,
                    "text": text,
                    "marker": { "color": series.color },
                    "hovertemplate": format!(
                        "{}=%{{x}}<br>{}=%{{y}}<br>%{{text}}<extra>{}</extra>",
                        self.x_label, self.y_label, series.name
                    ),
                })
            })
            .collect();

        json!({
            "data": data,
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_label } },
                "yaxis": {
                    "title": { "text": self.y_label },
                    "type": "category",
                    "categoryorder": "array",
                    "categoryarray": self.category_order,
                },
                "legend": { "title": { "text": self.color_key.legend_title() } },
            },
        })
    }
}

/// Payload against outcome, colored by booster version category.
pub fn build_scatter(subset: &[&LaunchRecord]) -> ScatterSpec {
    build_scatter_with(subset, ColorKey::BoosterCategory)
}

pub fn build_scatter_with(subset: &[&LaunchRecord], color_key: ColorKey) -> ScatterSpec {
    let series = match color_key {
        ColorKey::BoosterCategory => series_by_category(subset),
        ColorKey::Outcome => series_by_outcome(subset),
    };

    ScatterSpec {
        title: SCATTER_TITLE.to_string(),
        x_label: PAYLOAD_LABEL.to_string(),
        y_label: OUTCOME_LABEL.to_string(),
        color_key,
        category_order: Outcome::ORDER.iter().map(|o| o.label().to_string()).collect(),
        series,
    }
}

fn series_by_category(subset: &[&LaunchRecord]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for record in subset {
        let idx = match series.iter().position(|s| s.name == record.booster_category) {
            Some(idx) => idx,
            None => {
                let color = CATEGORY_PALETTE[series.len() % CATEGORY_PALETTE.len()];
                series.push(ScatterSeries {
                    name: record.booster_category.clone(),
                    color: color.to_string(),
                    points: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[idx].points.push(point(record));
    }
    series
}

fn series_by_outcome(subset: &[&LaunchRecord]) -> Vec<ScatterSeries> {
    Outcome::ORDER
        .iter()
        .map(|&outcome| ScatterSeries {
            name: outcome.label().to_string(),
            color: color_for_outcome(outcome).to_string(),
            points: subset.iter().filter(|r| r.outcome == outcome).map(|r| point(r)).collect(),
        })
        .filter(|s| !s.points.is_empty())
        .collect()
}

fn point(record: &LaunchRecord) -> ScatterPoint {
    let mut hover = format!("{}: {}", SITE_LABEL, record.site);
    if let Some(n) = record.flight_number {
        hover.push_str(&format!("<br>Flight {n}"));
    }
    if let Some(ref version) = record.booster_version {
        hover.push_str(&format!("<br>{version}"));
    }
    ScatterPoint {
        payload_mass_kg: record.payload_mass_kg,
        outcome: record.outcome,
        hover,
    }
}
