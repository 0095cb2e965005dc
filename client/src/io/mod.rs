//! # IO Module
//!
//! Adapter layer between the domain and the attendance backend.
//!
//! ## Key Responsibilities
//!
//! - **REST client**: one method per backend endpoint, JSON in and out
//! - **Mapping**: converting domain records into the `shared` wire DTOs
//! - **Error translation**: HTTP status codes into [`crate::error::ClientError`]
//!
//! ## Endpoints
//!
//! - **POST /api/asistencias/registrar/**: submit an attendance record
//! - **GET /api/cais/?search=**: site candidates for the selection modal
//! - **POST /api/token/**: bearer token for login
//! - **GET /api/avisos/**: bulletin board
//! - **GET /api/lista_usuarios/**, **GET/POST /api/chat/<id>/**: chat (bearer)

pub mod rest;

pub use rest::*;
