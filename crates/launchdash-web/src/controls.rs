//! User controls: the site selector and the payload range selector.

use serde::{Deserialize, Serialize};

use launchdash_common::{DashboardConfig, Result};
use launchdash_data::{Dataset, PayloadRange, SiteSelection, ALL_SITES};

/// Input controls, identified by their element id on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

/// Chart regions, identified by their element id on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

/// Current values of both controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl ControlState {
    /// Every site, full payload range.
    pub fn initial(dataset: &Dataset) -> Result<Self> {
        Ok(Self {
            site: SiteSelection::All,
            payload_range: PayloadRange::full(dataset)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    pub id: ControlId,
    pub options: Vec<SiteOption>,
    pub value: SiteSelection,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSliderSpec {
    pub id: ControlId,
    pub min: f64,
    pub max: f64,
    pub step: u32,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

/// Everything the page needs to draw the two controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanel {
    pub dropdown: DropdownSpec,
    pub slider: RangeSliderSpec,
}

impl ControlPanel {
    pub fn build(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        let initial = ControlState::initial(dataset)?;
        let (min, max) = dataset.payload_bounds()?;

        Ok(Self {
            dropdown: DropdownSpec {
                id: ControlId::SiteDropdown,
                options: site_options(dataset),
                value: initial.site,
                placeholder: "Select a Launch Site here".to_string(),
                searchable: true,
            },
            slider: RangeSliderSpec {
                id: ControlId::PayloadSlider,
                min,
                max,
                step: config.slider_step,
                marks: slider_marks(min, max, config.mark_interval),
                value: initial.payload_range,
            },
        })
    }
}

/// "All Sites" followed by each site in dataset order.
pub fn site_options(dataset: &Dataset) -> Vec<SiteOption> {
    std::iter::once(SiteOption { label: "All Sites".to_string(), value: ALL_SITES.to_string() })
        .chain(dataset.sites().into_iter().map(|site| SiteOption {
            label: site.to_string(),
            value: site.to_string(),
        }))
        .collect()
}

/// Labelled marks every `interval` kg from `floor(min)` through `floor(max)`.
pub fn slider_marks(min: f64, max: f64, interval: u32) -> Vec<SliderMark> {
    let start = min.floor() as i64;
    let end = max.floor() as i64;
    let step = i64::from(interval.max(1));

    (start..=end)
        .step_by(step as usize)
        .map(|value| SliderMark { value, label: value.to_string() })
        .collect()
}
