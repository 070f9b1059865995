//! Generación de trazados aproximados
//! 
//! Produce una polilínea entre dos puntos con desviación sinusoidal en zig-zag
//! y ruido de carretera. Solo sirve para dibujar; la distancia reportada se
//! calcula después con haversine sobre estos puntos.

use rand::Rng;
use std::f64::consts::PI;

use crate::models::route::Coordinate;

const MIN_SEGMENTS: usize = 10;
const SEGMENTS_PER_DEGREE: f64 = 10.0;
const DEVIATION_RATIO: f64 = 0.2;
const DEVIATION_SCALE: f64 = 0.1;
/// Ancho total del ruido por eje: [-0.005, 0.005)
const ROAD_NOISE_WIDTH: f64 = 0.01;

/// max(10, floor(distancia_plana * 10))
pub fn segment_count(start: &Coordinate, end: &Coordinate) -> usize {
    let planar = start.planar_distance(end);
    ((planar * SEGMENTS_PER_DEGREE).floor() as usize).max(MIN_SEGMENTS)
}

/// Trazado de `segment_count + 1` puntos; los extremos son exactamente `start` y `end`
pub fn synthesize<R: Rng + ?Sized>(
    start: Coordinate,
    end: Coordinate,
    curve_factor: f64,
    rng: &mut R,
) -> Vec<Coordinate> {
    let planar = start.planar_distance(&end);
    let segments = segment_count(&start, &end);

    let mut path = Vec::with_capacity(segments + 1);
    path.push(start);

    for i in 1..segments {
        let ratio = i as f64 / segments as f64;

        let mut lat = start.lat + (end.lat - start.lat) * ratio;
        let mut lng = start.lng + (end.lng - start.lng) * ratio;

        // Máxima en el centro del trayecto, con signo alterno
        let deviation = (ratio * PI).sin() * (planar * DEVIATION_RATIO) * curve_factor * DEVIATION_SCALE;
        if i % 2 == 0 {
            lat += deviation;
            lng -= deviation;
        } else {
            lat -= deviation;
            lng += deviation;
        }

        lat += (rng.gen::<f64>() - 0.5) * ROAD_NOISE_WIDTH;
        lng += (rng.gen::<f64>() - 0.5) * ROAD_NOISE_WIDTH;

        path.push(Coordinate::new(lat, lng));
    }

    path.push(end);
    path
}
