//! Reactive controller: maps control changes to the chart outputs that depend on them.
//!
//! Dependencies are declared up front in [`DEPENDENCIES`]. A change to a control
//! recomputes exactly the outputs listed against it, synchronously, from the
//! shared read-only dataset and the current [`ControlState`].

use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use launchdash_common::Result;
use launchdash_data::{
    compute_single_site_summary, compute_site_summaries, filter_records, Dataset, PayloadRange,
    SiteSelection,
};

use crate::charts::{
    build_overview_pie, build_scatter_with, build_site_pie, ColorKey, PieSpec, ScatterSpec,
};
use crate::controls::{ControlId, ControlState, OutputId};

/// Each output and the controls it reads.
pub const DEPENDENCIES: [(OutputId, &[ControlId]); 2] = [
    (OutputId::SuccessPieChart, &[ControlId::SiteDropdown]),
    (
        OutputId::SuccessPayloadScatterChart,
        &[ControlId::SiteDropdown, ControlId::PayloadSlider],
    ),
];

/// Outputs to recompute when `control` changes, in declaration order.
pub fn outputs_for(control: ControlId) -> Vec<OutputId> {
    DEPENDENCIES
        .iter()
        .filter(|(_, inputs)| inputs.contains(&control))
        .map(|(output, _)| *output)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteSelected(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::SiteSelected(_) => ControlId::SiteDropdown,
            ControlEvent::PayloadRangeChanged(_) => ControlId::PayloadSlider,
        }
    }
}

/// What a chart region shows: a chart, or an error message in place of it.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Pie(PieSpec),
    Scatter(ScatterSpec),
    Error { message: String },
}

/// Wire form of a [`ChartView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartOutput {
    Figure { figure: Value },
    Error { message: String },
}

impl ChartView {
    pub fn to_output(&self) -> ChartOutput {
        match self {
            ChartView::Pie(pie) => ChartOutput::Figure { figure: pie.to_figure() },
            ChartView::Scatter(scatter) => ChartOutput::Figure { figure: scatter.to_figure() },
            ChartView::Error { message } => ChartOutput::Error { message: message.clone() },
        }
    }
}

impl Serialize for ChartView {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_output().serialize(serializer)
    }
}

/// A recomputed output, replacing whatever the region showed before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputUpdate {
    pub output: OutputId,
    pub view: ChartView,
}

/// Pie for the overview ("ALL") or a single site. An unknown site becomes a
/// chart-area error rather than a failure.
pub fn pie_view(dataset: &Dataset, site: &SiteSelection) -> ChartView {
    match site {
        SiteSelection::All => ChartView::Pie(build_overview_pie(&compute_site_summaries(dataset))),
        SiteSelection::Site(name) => match compute_single_site_summary(dataset, name) {
            Ok(summary) => ChartView::Pie(build_site_pie(&summary)),
            Err(e) => {
                warn!("Pie chart unavailable: {e}");
                ChartView::Error { message: e.to_string() }
            }
        },
    }
}

pub fn scatter_view(
    dataset: &Dataset,
    site: &SiteSelection,
    range: &PayloadRange,
    color_key: ColorKey,
) -> ChartView {
    let subset = filter_records(dataset, site, range);
    ChartView::Scatter(build_scatter_with(&subset, color_key))
}

/// Owns the control state for one dashboard view.
#[derive(Debug, Clone)]
pub struct Controller {
    dataset: Arc<Dataset>,
    bounds: (f64, f64),
    color_key: ColorKey,
    state: ControlState,
}

impl Controller {
    /// Start from the initial state: every site, full payload range.
    pub fn new(dataset: Arc<Dataset>, color_key: ColorKey) -> Result<Self> {
        let state = ControlState::initial(&dataset)?;
        Self::with_state(dataset, color_key, state)
    }

    /// Resume from a known state. A payload range overlapping the dataset bounds
    /// is clamped to them; one outside them is kept and selects nothing.
    pub fn with_state(dataset: Arc<Dataset>, color_key: ColorKey, state: ControlState) -> Result<Self> {
        let bounds = dataset.payload_bounds()?;
        let payload_range = state.payload_range.clamp_to(bounds.0, bounds.1);
        Ok(Self {
            dataset,
            bounds,
            color_key,
            state: ControlState { payload_range, ..state },
        })
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Apply a user change and return the outputs that depend on it.
    pub fn apply(&mut self, event: ControlEvent) -> Vec<OutputUpdate> {
        let control = event.control();
        match event {
            ControlEvent::SiteSelected(site) => self.state.site = site,
            ControlEvent::PayloadRangeChanged(range) => self.state.payload_range = self.clamp(range),
        }
        self.recompute(control)
    }

    /// Recompute every output that depends on `control`.
    pub fn recompute(&self, control: ControlId) -> Vec<OutputUpdate> {
        let outputs = outputs_for(control);
        debug!(?control, ?outputs, site = %self.state.site, "Recomputing outputs");
        outputs.into_iter().map(|output| self.update(output)).collect()
    }

    /// Both outputs for the current state.
    pub fn render_all(&self) -> Vec<OutputUpdate> {
        DEPENDENCIES.iter().map(|(output, _)| self.update(*output)).collect()
    }

    pub fn render(&self, output: OutputId) -> ChartView {
        match output {
            OutputId::SuccessPieChart => pie_view(&self.dataset, &self.state.site),
            OutputId::SuccessPayloadScatterChart => scatter_view(
                &self.dataset,
                &self.state.site,
                &self.state.payload_range,
                self.color_key,
            ),
        }
    }

    fn update(&self, output: OutputId) -> OutputUpdate {
        OutputUpdate { output, view: self.render(output) }
    }

    fn clamp(&self, range: PayloadRange) -> PayloadRange {
        range.clamp_to(self.bounds.0, self.bounds.1)
    }
}

/// Turn a client-reported state change into the event for the control that changed.
pub fn event_for(changed: ControlId, state: &ControlState) -> ControlEvent {
    match changed {
        ControlId::SiteDropdown => ControlEvent::SiteSelected(state.site.clone()),
        ControlId::PayloadSlider => ControlEvent::PayloadRangeChanged(state.payload_range),
    }
}

/// Build a payload range from optional client bounds. A missing end defaults to
/// the dataset's bound, widened to the given end so a one-sided range is never inverted.
pub fn range_from_bounds(dataset: &Dataset, low: Option<f64>, high: Option<f64>) -> Result<PayloadRange> {
    let (min, max) = dataset.payload_bounds()?;
    match (low, high) {
        (Some(low), Some(high)) => PayloadRange::new(low, high),
        (Some(low), None) => PayloadRange::new(low, max.max(low)),
        (None, Some(high)) => PayloadRange::new(min.min(high), high),
        (None, None) => PayloadRange::new(min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchdash_common::DashError;
    use launchdash_data::{LaunchRecord, Outcome};

    fn dataset() -> Arc<Dataset> {
        Arc::new(
            Dataset::from_records(vec![
                LaunchRecord::new("A", 500.0, "v1.0", Outcome::Success),
                LaunchRecord::new("A", 2500.0, "v1.1", Outcome::Failure),
                LaunchRecord::new("A", 9000.0, "FT", Outcome::Success),
                LaunchRecord::new("B", 4000.0, "FT", Outcome::Failure),
                LaunchRecord::new("B", 6000.0, "B4", Outcome::Failure),
            ])
            .unwrap(),
        )
    }

    fn scatter_points(view: &ChartView) -> usize {
        match view {
            ChartView::Scatter(s) => s.point_count(),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn test_dependency_edges() {
        assert_eq!(
            outputs_for(ControlId::SiteDropdown),
            vec![OutputId::SuccessPieChart, OutputId::SuccessPayloadScatterChart]
        );
        assert_eq!(outputs_for(ControlId::PayloadSlider), vec![OutputId::SuccessPayloadScatterChart]);
    }

    #[test]
    fn test_initial_render() {
        let controller = Controller::new(dataset(), ColorKey::BoosterCategory).unwrap();
        assert_eq!(controller.state().site, SiteSelection::All);

        let updates = controller.render_all();
        assert_eq!(updates.len(), 2);
        match &updates[0].view {
            ChartView::Pie(pie) => assert_eq!(pie.slices.len(), 2),
            other => panic!("expected pie, got {other:?}"),
        }
        assert_eq!(scatter_points(&updates[1].view), 5);
    }

    #[test]
    fn test_site_change_updates_both_outputs() {
        let mut controller = Controller::new(dataset(), ColorKey::BoosterCategory).unwrap();
        let updates = controller.apply(ControlEvent::SiteSelected("B".into()));

        assert_eq!(updates.len(), 2);
        match &updates[0].view {
            ChartView::Pie(pie) => {
                assert_eq!(pie.title, "Launch Success/Failure Distribution for B");
                assert_eq!(pie.slices[1].value, 0.0);
            }
            other => panic!("expected pie, got {other:?}"),
        }
        assert_eq!(scatter_points(&updates[1].view), 2);
    }

    #[test]
    fn test_range_change_leaves_pie_alone() {
        let mut controller = Controller::new(dataset(), ColorKey::BoosterCategory).unwrap();
        let pie_before = controller.render(OutputId::SuccessPieChart);

        let empty = PayloadRange::new(9100.0, 9200.0).unwrap();
        let updates = controller.apply(ControlEvent::PayloadRangeChanged(empty));

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].output, OutputId::SuccessPayloadScatterChart);
        assert_eq!(scatter_points(&updates[0].view), 0);
        assert_eq!(controller.render(OutputId::SuccessPieChart), pie_before);
    }

    #[test]
    fn test_unknown_site_is_chart_error() {
        let mut controller = Controller::new(dataset(), ColorKey::BoosterCategory).unwrap();
        let updates = controller.apply(ControlEvent::SiteSelected("Nowhere".into()));

        assert!(matches!(updates[0].view, ChartView::Error { .. }));
        assert_eq!(scatter_points(&updates[1].view), 0);

        let json = serde_json::to_value(&updates[0]).unwrap();
        assert_eq!(json["output"], "success-pie-chart");
        assert_eq!(json["view"]["kind"], "error");
    }

    #[test]
    fn test_range_clamped_to_bounds() {
        let state = ControlState {
            site: SiteSelection::All,
            payload_range: PayloadRange::new(-1000.0, 50_000.0).unwrap(),
        };
        let controller = Controller::with_state(dataset(), ColorKey::Outcome, state).unwrap();
        assert_eq!(controller.state().payload_range.low(), 500.0);
        assert_eq!(controller.state().payload_range.high(), 9000.0);
    }

    #[test]
    fn test_range_beyond_bounds_selects_nothing() {
        let mut controller = Controller::new(dataset(), ColorKey::BoosterCategory).unwrap();
        let beyond = PayloadRange::new(9100.0, 9900.0).unwrap();
        let updates = controller.apply(ControlEvent::PayloadRangeChanged(beyond));

        assert_eq!(controller.state().payload_range, beyond);
        assert_eq!(scatter_points(&updates[0].view), 0);
    }

    #[test]
    fn test_one_sided_range_defaults() {
        let dataset = dataset();
        let above = range_from_bounds(&dataset, Some(9500.0), None).unwrap();
        assert_eq!((above.low(), above.high()), (9500.0, 9500.0));

        let below = range_from_bounds(&dataset, None, Some(100.0)).unwrap();
        assert_eq!((below.low(), below.high()), (100.0, 100.0));

        let inside = range_from_bounds(&dataset, Some(1000.0), None).unwrap();
        assert_eq!((inside.low(), inside.high()), (1000.0, 9000.0));

        assert!(matches!(
            range_from_bounds(&dataset, Some(5000.0), Some(100.0)),
            Err(DashError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_idempotent() {
        let state = ControlState {
            site: "A".into(),
            payload_range: PayloadRange::new(400.0, 3000.0).unwrap(),
        };
        let first = Controller::with_state(dataset(), ColorKey::BoosterCategory, state.clone()).unwrap();
        let second = Controller::with_state(dataset(), ColorKey::BoosterCategory, state).unwrap();
        assert_eq!(first.render_all(), second.render_all());
        assert_eq!(first.render_all(), first.render_all());
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let empty = Arc::new(Dataset::from_records(vec![]).unwrap());
        assert!(matches!(
            Controller::new(empty, ColorKey::BoosterCategory),
            Err(DashError::EmptyDataset)
        ));
    }
}
