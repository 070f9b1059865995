//! Optimizador de rutas
//! 
//! Para un origen y un destino devuelve tres opciones (fastest, shortest,
//! eco-friendly), cada una con su trazado, distancia, tiempo estimado y nivel
//! de tráfico. No toca estado compartido: el generador aleatorio lo aporta
//! quien llama.

use rand::Rng;

use super::distance::total_distance_km;
use super::geo_lookup::GeoLookup;
use super::path_synthesizer::synthesize;
use crate::models::route::{Coordinate, RouteKind, RouteOption};

/// Los EV se estiman con una conducción más conservadora
const EV_SPEED_MULTIPLIER: f64 = 0.95;

/// Distancia y tiempo reportados para un tipo de ruta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub minutes: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    geo: GeoLookup,
}

impl RouteOptimizer {
    pub fn new(geo: GeoLookup) -> Self {
        Self { geo }
    }

    /// Calcular las tres opciones, siempre en el orden fastest, shortest, eco-friendly
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        origin: &str,
        destination: &str,
        vehicle_class: &str,
        rng: &mut R,
    ) -> Vec<RouteOption> {
        let start = self.geo.resolve(origin);
        let end = self.geo.resolve(destination);
        let multiplier = speed_multiplier(vehicle_class);

        log::info!(
            "🧭 Optimizando ruta '{}' -> '{}' (clase: {}, multiplicador: {})",
            origin, destination, vehicle_class, multiplier
        );

        RouteKind::ALL
            .iter()
            .map(|kind| build_option(*kind, start, end, multiplier, &mut *rng))
            .collect()
    }
}

fn build_option<R: Rng + ?Sized>(
    kind: RouteKind,
    start: Coordinate,
    end: Coordinate,
    speed_multiplier: f64,
    rng: &mut R,
) -> RouteOption {
    let coordinates = synthesize(start, end, kind.curve_factor(), rng);
    let raw_km = total_distance_km(&coordinates);
    let estimate = estimate(kind, raw_km, speed_multiplier);

    RouteOption {
        kind,
        distance: format_distance(estimate.distance_km),
        estimated_time: format_duration(estimate.minutes),
        traffic_level: kind.traffic_level().to_string(),
        coordinates,
        distance_km: estimate.distance_km,
        estimated_minutes: estimate.minutes,
    }
}

/// 0.95 para la clase "EV" (sin distinguir mayúsculas), 1.0 para el resto
pub fn speed_multiplier(vehicle_class: &str) -> f64 {
    if vehicle_class.eq_ignore_ascii_case("EV") {
        EV_SPEED_MULTIPLIER
    } else {
        1.0
    }
}

/// Aplica el sesgo de distancia del tipo de ruta y calcula el tiempo con su velocidad base
pub fn estimate(kind: RouteKind, raw_km: f64, speed_multiplier: f64) -> RouteEstimate {
    let distance_km = raw_km * kind.distance_factor();
    let speed = kind.base_speed_kmh() * speed_multiplier;
    RouteEstimate {
        distance_km,
        minutes: distance_km / speed * 60.0,
    }
}

/// "12.3 km"
pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// "{h}h {m}m" a partir de una hora, "{m}m" por debajo
pub fn format_duration(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).floor() as u64;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_three_options_in_order() {
        let optimizer = RouteOptimizer::default();
        let mut rng = StdRng::seed_from_u64(3);
        let routes = optimizer.optimize("Bangalore", "Chennai", "SEDAN", &mut rng);

        let kinds: Vec<_> = routes.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, RouteKind::ALL.to_vec());
        assert_eq!(routes[0].traffic_level, "Light");
        assert_eq!(routes[1].traffic_level, "Moderate");
        assert_eq!(routes[2].traffic_level, "Efficient");
    }

    #[test]
    fn test_distance_factors_from_same_raw_total() {
        let raw = 140.0;
        let fastest = estimate(RouteKind::Fastest, raw, 1.0);
        let shortest = estimate(RouteKind::Shortest, raw, 1.0);
        let eco = estimate(RouteKind::EcoFriendly, raw, 1.0);

        assert!(shortest.distance_km < fastest.distance_km);
        assert!((shortest.distance_km - 133.0).abs() < 1e-9);
        assert!((eco.distance_km - 142.8).abs() < 1e-9);
        assert!((fastest.minutes - 112.0).abs() < 1e-9);
    }

    #[test]
    fn test_ev_drives_slower() {
        assert_eq!(speed_multiplier("ev"), 0.95);
        assert_eq!(speed_multiplier("EV"), 0.95);
        assert_eq!(speed_multiplier("Standard"), 1.0);

        let normal = estimate(RouteKind::Fastest, 75.0, speed_multiplier("SEDAN"));
        let ev = estimate(RouteKind::Fastest, 75.0, speed_multiplier("EV"));
        assert!((normal.minutes - 60.0).abs() < 1e-9);
        assert!(ev.minutes > normal.minutes);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42.7), "42m");
        assert_eq!(format_duration(60.0), "1h 0m");
        assert_eq!(format_duration(125.9), "2h 5m");
        assert_eq!(format_duration(0.0), "0m");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(133.04), "133.0 km");
        assert_eq!(format_distance(0.0), "0.0 km");
    }
}
