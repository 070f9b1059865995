use std::sync::Arc;

use crate::services::{TelemetrySimulator, TickReport};

pub struct TelemetryController {
    simulator: Arc<TelemetrySimulator>,
}

impl TelemetryController {
    pub fn new(simulator: Arc<TelemetrySimulator>) -> Self {
        Self { simulator }
    }

    pub async fn simulate(&self) -> TickReport {
        log::info!("📡 Tick de telemetría lanzado manualmente");
        self.simulator.tick().await
    }
}
