//! Dashboard handler — the single page with both controls and both charts.

use axum::{extract::State, response::Html};
use minijinja::context;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::{SharedState, DASHBOARD_TEMPLATE};

pub async fn dashboard(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let controller = state.controller(None)?;
    let outputs = controller.render_all();

    let template = state.templates.get_template(DASHBOARD_TEMPLATE)?;
    let html = template.render(context! {
        title => state.config.dashboard.title,
        dropdown => state.controls.dropdown,
        slider => state.controls.slider,
        controls_json => script_json(&state.controls),
        state_json => script_json(controller.state()),
        outputs_json => script_json(&outputs),
    })?;

    Ok(Html(html))
}

/// JSON safe to embed inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}
