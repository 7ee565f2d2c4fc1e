//! # portal-gate
//!
//! Cookie-based session gate in front of an upstream Identity Service:
//! login/logout/"who am I" proxy routes, a presence-only redirect gate,
//! server-rendered landing/login/dashboard pages, and a Rust client that
//! drives the login flow against those routes.

pub mod client;
pub mod config;
pub mod gate;
pub mod identity;
pub mod routes;
pub mod session;
pub mod session_cache;
pub mod state;
