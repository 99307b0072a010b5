//! SeaORM entity models
//!
//! Table-shaped models used by the PostgreSQL adapters. Domain code works
//! with the types in `domain::entities`; the adapters convert at the edge.

pub mod client;
pub mod credit_agreement;
pub mod credit_application;
