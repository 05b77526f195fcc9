//! Shared application state for the web server.

use std::sync::Arc;

use minijinja::Environment;

use launchdash_common::{DashConfig, Result};
use launchdash_data::Dataset;

use crate::charts::ColorKey;
use crate::controller::Controller;
use crate::controls::{ControlPanel, ControlState};

pub const DASHBOARD_TEMPLATE: &str = "dashboard.html";

/// Shared state injected into every Axum handler.
/// The dataset is loaded once before the server starts and never mutated.
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: DashConfig,
    /// Selector options and range bounds, derived from the dataset once
    pub controls: ControlPanel,
    pub templates: Environment<'static>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: DashConfig) -> anyhow::Result<Self> {
        let controls = ControlPanel::build(&dataset, &config.dashboard)?;

        let mut templates = Environment::new();
        templates.add_template(DASHBOARD_TEMPLATE, include_str!("../templates/dashboard.html"))?;

        Ok(Self {
            dataset: Arc::new(dataset),
            config,
            controls,
            templates,
        })
    }

    pub fn color_key(&self) -> ColorKey {
        self.config.dashboard.scatter_color.into()
    }

    /// A controller at the initial state, or resumed from `state`.
    pub fn controller(&self, state: Option<ControlState>) -> Result<Controller> {
        match state {
            Some(state) => Controller::with_state(self.dataset.clone(), self.color_key(), state),
            None => Controller::new(self.dataset.clone(), self.color_key()),
        }
    }
}

pub type SharedState = Arc<AppState>;
