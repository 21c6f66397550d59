//! # OtomaX gateway server
//! This crate hosts the HTTP boundary of the OtomaX gateway. It is responsible for:
//! Listening for incoming transaction requests from OtomaX members.
//! Parsing and shape-checking the query string, and working out which address the caller is calling from.
//! Handing the request to the [`oto_auth_engine`] and rendering its decision as JSON.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/ping`: Returns `{"message": "pong"}`.
//! * `/trx`: Authenticates a transaction request. See [`routes::trx`].

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod middleware;
pub mod routes;
pub mod server;
