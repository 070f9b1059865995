//! Distancias sobre la superficie terrestre (haversine)

use crate::models::route::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia de gran círculo entre dos coordenadas, en km
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Suma de las distancias entre puntos consecutivos; 0 con menos de dos puntos
pub fn total_distance_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|pair| haversine_km(&pair[0], &pair[1])).sum()
}
