//! TUI application state.

use crate::config::{DashboardConfig, InputLimits};
use crate::error::ImpactError;
use crate::impact::{GridImpactCalculator, ImpactReport};
use crate::predict::PredictionService;

/// Unit-count steps taken by PageUp/PageDown.
pub const PAGE_STEPS: u32 = 100;

/// TUI application state.
pub struct App {
    service: PredictionService,
    config: DashboardConfig,
    /// Outdoor ambient temperature (°C).
    pub outdoor: f64,
    /// Fleet size.
    pub units: u32,
    /// Result of the last recompute; errors are shown in place of the table.
    pub result: Result<ImpactReport, ImpactError>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app at the configured default inputs and computes once.
    pub fn new(service: PredictionService, config: DashboardConfig) -> Self {
        let limits = config.inputs;
        let outdoor = limits.clamp_outdoor(limits.outdoor_default_c);
        let units = limits.clamp_unit_count(limits.unit_count_default);
        let result = compute(&service, &config, outdoor, units);
        Self {
            service,
            config,
            outdoor,
            units,
            result,
            quit: false,
        }
    }

    pub fn limits(&self) -> &InputLimits {
        &self.config.inputs
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Moves the outdoor temperature by `steps` configured increments.
    pub fn step_outdoor(&mut self, steps: f64) {
        let limits = self.config.inputs;
        self.outdoor = limits.clamp_outdoor(self.outdoor + steps * limits.outdoor_step_c);
        self.recompute();
    }

    /// Moves the unit count by `steps` configured increments.
    pub fn step_units(&mut self, steps: i64) {
        let limits = self.config.inputs;
        let next = i64::from(self.units) + steps * i64::from(limits.unit_count_step);
        let next = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
        self.units = limits.clamp_unit_count(next);
        self.recompute();
    }

    pub fn page_units(&mut self, pages: i64) {
        self.step_units(pages * i64::from(PAGE_STEPS));
    }

    /// Restores the default inputs.
    pub fn reset(&mut self) {
        let limits = self.config.inputs;
        self.outdoor = limits.clamp_outdoor(limits.outdoor_default_c);
        self.units = limits.clamp_unit_count(limits.unit_count_default);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = compute(&self.service, &self.config, self.outdoor, self.units);
    }
}

fn compute(
    service: &PredictionService,
    config: &DashboardConfig,
    outdoor: f64,
    units: u32,
) -> Result<ImpactReport, ImpactError> {
    GridImpactCalculator::new(
        service,
        config.setpoints,
        config.classification.dead_band_mw,
    )
    .compute(outdoor, units)
}
