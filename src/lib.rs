//! Backend de telemetría de flota
//! 
//! Simulación de telemetría y desgaste de vehículos, optimización de rutas y
//! analytics de mantenimiento sobre un almacenamiento intercambiable
//! (memoria o PostgreSQL).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
