//! Aggregation engine: pure functions over the dataset and the current filters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use launchdash_common::{DashError, Result};

use crate::dataset::{Dataset, LaunchRecord};

/// Sentinel the site selector uses for "every site".
pub const ALL_SITES: &str = "ALL";

/// Per-site outcome counts. Only built for sites with at least one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSuccessSummary {
    pub site: String,
    pub success_count: u32,
    pub failure_count: u32,
}

impl SiteSuccessSummary {
    pub fn total(&self) -> u32 {
        self.success_count + self.failure_count
    }

    pub fn success_percentage(&self) -> f64 {
        compute_success_percentage(self)
    }
}

/// Site selector value: every site, or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        SiteSelection::from(value.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive payload mass range, `low <= high`. Serialized as `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(DashError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// The full range of the dataset's payload masses.
    pub fn full(dataset: &Dataset) -> Result<Self> {
        let (low, high) = dataset.payload_bounds()?;
        Self::new(low, high)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }

    pub fn overlaps(&self, min: f64, max: f64) -> bool {
        self.low <= max && min <= self.high
    }

    /// Clamp both ends into `[min, max]`. A range lying wholly outside
    /// `[min, max]` is returned unchanged, so it still selects nothing.
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        if !self.overlaps(min, max) {
            return self;
        }
        Self {
            low: self.low.clamp(min, max),
            high: self.high.clamp(min, max),
        }
    }
}

impl TryFrom<(f64, f64)> for PayloadRange {
    type Error = DashError;

    fn try_from((low, high): (f64, f64)) -> Result<Self> {
        Self::new(low, high)
    }
}

impl From<PayloadRange> for (f64, f64) {
    fn from(range: PayloadRange) -> Self {
        (range.low, range.high)
    }
}

/// Records matching the current filters, in dataset order.
pub type FilteredSubset<'a> = Vec<&'a LaunchRecord>;

/// Group every record by site and count outcomes.
/// Sites are ordered lexically, which fixes the overview legend order.
pub fn compute_site_summaries(dataset: &Dataset) -> Vec<SiteSuccessSummary> {
    let mut counts: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for record in dataset.records() {
        let entry = counts.entry(record.site.as_str()).or_default();
        if record.outcome.is_success() {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(site, (success_count, failure_count))| SiteSuccessSummary {
            site: site.to_string(),
            success_count,
            failure_count,
        })
        .collect()
}

/// `100 * success / (success + failure)`, in `[0, 100]`.
/// A summary with no records (which the aggregation never produces) yields 0.
pub fn compute_success_percentage(summary: &SiteSuccessSummary) -> f64 {
    let total = summary.total();
    if total == 0 {
        return 0.0;
    }
    100.0 * f64::from(summary.success_count) / f64::from(total)
}

/// Outcome counts for a single site.
pub fn compute_single_site_summary(dataset: &Dataset, site: &str) -> Result<SiteSuccessSummary> {
    let mut summary = SiteSuccessSummary {
        site: site.to_string(),
        success_count: 0,
        failure_count: 0,
    };

    for record in dataset.records().iter().filter(|r| r.site == site) {
        if record.outcome.is_success() {
            summary.success_count += 1;
        } else {
            summary.failure_count += 1;
        }
    }

    if summary.total() == 0 {
        return Err(DashError::UnknownSite(site.to_string()));
    }
    Ok(summary)
}

/// Records at the selected site (or any site) whose payload lies in `range`, inclusive.
/// An empty result is not an error.
pub fn filter_records<'a>(
    dataset: &'a Dataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> FilteredSubset<'a> {
    dataset
        .records()
        .iter()
        .filter(|r| selection.matches(&r.site) && range.contains(r.payload_mass_kg))
        .collect()
}
