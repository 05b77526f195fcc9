//! Chart and control endpoints backing the dashboard page.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use launchdash_data::SiteSelection;

use crate::controller::{event_for, range_from_bounds, OutputUpdate};
use crate::controls::{ControlId, ControlPanel, ControlState};
use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct ChartsQuery {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub state: ControlState,
    pub outputs: Vec<OutputUpdate>,
}

/// A control change reported by the page. `state` already holds the new value.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub seq: u64,
    pub changed: ControlId,
    pub state: ControlState,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Echoed so the page can drop responses older than its latest request
    pub seq: u64,
    pub state: ControlState,
    pub outputs: Vec<OutputUpdate>,
}

/// GET /api/controls — selector options, range bounds, step and marks
pub async fn api_controls(State(state): State<SharedState>) -> Json<ControlPanel> {
    Json(state.controls.clone())
}

/// GET /api/charts — both charts for a full control state
pub async fn api_charts(
    State(state): State<SharedState>,
    Query(query): Query<ChartsQuery>,
) -> Result<Json<ChartsResponse>, ApiError> {
    let site = query.site.map(SiteSelection::from).unwrap_or_default();
    let payload_range = range_from_bounds(&state.dataset, query.low, query.high)?;

    let controller = state.controller(Some(ControlState { site, payload_range }))?;
    Ok(Json(ChartsResponse {
        state: controller.state().clone(),
        outputs: controller.render_all(),
    }))
}

/// POST /api/update — recompute only the outputs that depend on the changed control
pub async fn api_update(
    State(state): State<SharedState>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    debug!(seq = request.seq, changed = ?request.changed, "Control update");

    let event = event_for(request.changed, &request.state);
    let mut controller = state.controller(Some(request.state))?;
    let outputs = controller.apply(event);

    Ok(Json(UpdateResponse {
        seq: request.seq,
        state: controller.state().clone(),
        outputs,
    }))
}
