//! Middleware del sistema
//! 
//! Por ahora solo CORS; las trazas HTTP las añade `TraceLayer` en el router.

pub mod cors;

pub use cors::*;
