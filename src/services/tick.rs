//! Infraestructura común de los ticks periódicos
//! 
//! `TickGuard` impide que dos ejecuciones del mismo motor se solapen y
//! `TickReport` resume lo que hizo cada pasada, incluidos los fallos por vehículo.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Bandera "en curso" sin bloqueo: si ya hay un tick corriendo, el siguiente se salta
#[derive(Debug, Default)]
pub struct TickGuard {
    running: AtomicBool,
}

/// Se libera al salir de scope
#[derive(Debug)]
pub struct TickPermit<'a> {
    guard: &'a TickGuard,
}

impl TickGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<TickPermit<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TickPermit { guard: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for TickPermit<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}

/// Fallo aislado de un vehículo durante un tick
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFailure {
    pub vehicle_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub job: String,
    pub started_at: DateTime<Utc>,
    /// true si no se ejecutó porque había otro tick en curso
    pub skipped: bool,
    pub processed: usize,
    /// Vehículos que no aplicaban en este tick (p.ej. no están IN_USE)
    pub untouched: usize,
    pub failures: Vec<VehicleFailure>,
    /// Error que impidió recorrer la flota (p.ej. no se pudo listar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TickReport {
    pub fn started(job: &str) -> Self {
        Self {
            job: job.to_string(),
            started_at: Utc::now(),
            skipped: false,
            processed: 0,
            untouched: 0,
            failures: Vec::new(),
            error: None,
        }
    }

    pub fn skipped(job: &str) -> Self {
        Self {
            skipped: true,
            ..Self::started(job)
        }
    }

    pub fn record_failure(&mut self, vehicle_id: Uuid, message: impl Into<String>) {
        self.failures.push(VehicleFailure {
            vehicle_id,
            message: message.into(),
        });
    }

    pub fn aborted(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn is_clean(&self) -> bool {
        !self.skipped && self.error.is_none() && self.failures.is_empty()
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped {
            return write!(f, "{}: omitido (tick anterior en curso)", self.job);
        }
        if let Some(error) = &self.error {
            return write!(f, "{}: abortado ({})", self.job, error);
        }
        write!(
            f,
            "{}: {} procesados, {} sin cambios, {} fallos",
            self.job,
            self.processed,
            self.untouched,
            self.failures.len()
        )
    }
}

/// Generador de la simulación: fijo si hay semilla (con un stream distinto por motor), aleatorio si no
pub fn simulation_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_guard_rejects_overlap() {
        let guard = TickGuard::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_running());
        assert!(guard.try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_running());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a: Vec<u32> = simulation_rng(Some(42), 1).sample_iter(rand::distributions::Standard).take(5).collect();
        let b: Vec<u32> = simulation_rng(Some(42), 1).sample_iter(rand::distributions::Standard).take(5).collect();
        let c: Vec<u32> = simulation_rng(Some(42), 2).sample_iter(rand::distributions::Standard).take(5).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_report_display() {
        let mut report = TickReport::started("health");
        report.processed = 3;
        report.record_failure(Uuid::nil(), "boom");
        assert_eq!(report.to_string(), "health: 3 procesados, 0 sin cambios, 1 fallos");
        assert!(!report.is_clean());
        assert_eq!(TickReport::skipped("telemetry").to_string(), "telemetry: omitido (tick anterior en curso)");
    }
}
