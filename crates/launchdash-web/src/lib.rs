//! launchdash-web — Web dashboard over the launch records dataset.
//! Provides a single page with:
//!   - Launch site selector (all sites or one site)
//!   - Success pie chart (per-site success rates, or one site's success/failure split)
//!   - Payload range selector
//!   - Payload vs. outcome scatter chart

pub mod charts;
pub mod controls;
pub mod controller;
pub mod error;
pub mod router;
pub mod handlers;
pub mod state;
