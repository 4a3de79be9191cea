//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration and login for the three principal realms (user, provider,
//! admin) live here, behind a repository trait so the web layer stays thin.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
