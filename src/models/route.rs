//! Modelo de Route
//! 
//! Este módulo contiene las coordenadas, los tipos de ruta y la opción de ruta
//! que devuelve el optimizador. Ninguno de estos valores se persiste.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Par (latitud, longitud) en grados
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Distancia euclidiana tratando (lat, lng) como plano; solo para dar forma al trazado
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        ((other.lat - self.lat).powi(2) + (other.lng - self.lng).powi(2)).sqrt()
    }
}

/// Tipo de ruta calculada por el optimizador
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RouteKind {
    #[serde(rename = "fastest")]
    Fastest,
    #[serde(rename = "shortest")]
    Shortest,
    #[serde(rename = "eco-friendly")]
    EcoFriendly,
}

impl RouteKind {
    /// Orden en el que se devuelven las opciones
    pub const ALL: [RouteKind; 3] = [RouteKind::Fastest, RouteKind::Shortest, RouteKind::EcoFriendly];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Fastest => "fastest",
            RouteKind::Shortest => "shortest",
            RouteKind::EcoFriendly => "eco-friendly",
        }
    }

    pub fn curve_factor(&self) -> f64 {
        match self {
            RouteKind::Fastest => 1.0,
            RouteKind::Shortest => 0.9,
            RouteKind::EcoFriendly => 1.1,
        }
    }

    /// Velocidad base en km/h antes del ajuste por clase de vehículo
    pub fn base_speed_kmh(&self) -> f64 {
        match self {
            RouteKind::Fastest => 75.0,
            RouteKind::Shortest => 50.0,
            RouteKind::EcoFriendly => 65.0,
        }
    }

    /// Sesgo aplicado a la distancia haversine para la distancia reportada
    pub fn distance_factor(&self) -> f64 {
        match self {
            RouteKind::Fastest => 1.0,
            RouteKind::Shortest => 0.95,
            RouteKind::EcoFriendly => 1.02,
        }
    }

    pub fn traffic_level(&self) -> &'static str {
        match self {
            RouteKind::Fastest => "Light",
            RouteKind::Shortest => "Moderate",
            RouteKind::EcoFriendly => "Efficient",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opción de ruta devuelta al cliente
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    #[serde(rename = "type")]
    pub kind: RouteKind,
    /// "12.3 km"
    pub distance: String,
    /// "1h 5m" o "42m"
    pub estimated_time: String,
    pub traffic_level: String,
    pub coordinates: Vec<Coordinate>,
    pub distance_km: f64,
    pub estimated_minutes: f64,
}
