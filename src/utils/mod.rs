//! Utilidades del sistema
//! 
//! Este módulo contiene el manejo de errores y la validación de requests.

pub mod errors;
pub mod validation;

pub use errors::*;
