//! Registro de vehículos
//!
//! Servicio CRUD sobre HTTP para vehículos identificados por su VIN.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
