//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on request parsing and auth plumbing. Each
//! entity gets a plain repository module over the shared pool.

pub mod auth;
pub mod image;
pub mod session;
pub mod user;
