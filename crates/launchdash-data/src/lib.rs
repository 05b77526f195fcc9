//! Launch records dataset and the aggregations the dashboard charts are built from.
//!
//! The dataset is a CSV with one row per launch:
//!
//! | Column                     | Meaning                          |
//! |----------------------------|----------------------------------|
//! | `Launch Site`              | launch location identifier       |
//! | `Payload Mass (kg)`        | non-negative payload mass        |
//! | `Booster Version Category` | booster family, e.g. `FT`, `B5`  |
//! | `class`                    | `1` success, `0` failure         |
//!
//! # Example
//!
//! ```rust,no_run
//! use launchdash_data::{Dataset, SiteSelection, PayloadRange, compute_site_summaries, filter_records};
//!
//! fn main() -> launchdash_common::Result<()> {
//!     let dataset = Dataset::load("spacex_launch_dash.csv")?;
//!
//!     for summary in compute_site_summaries(&dataset) {
//!         println!("{}: {:.1}%", summary.site, summary.success_percentage());
//!     }
//!
//!     let heavy = PayloadRange::new(5000.0, dataset.max_payload()?)?;
//!     let subset = filter_records(&dataset, &SiteSelection::All, &heavy);
//!     println!("{} heavy launches", subset.len());
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod aggregate;

pub use dataset::{Dataset, LaunchRecord, Outcome};
pub use aggregate::{
    compute_single_site_summary, compute_site_summaries, compute_success_percentage,
    filter_records, FilteredSubset, PayloadRange, SiteSelection, SiteSuccessSummary, ALL_SITES,
};
