//! Core types and traits for the car sales agent
//!
//! This crate provides foundational types used across all other crates:
//! - Catalog entities (`Car`, `CarFilter`)
//! - The `CatalogRepository` trait implemented by storage backends
//! - Error types shared across the workspace

pub mod car;
pub mod error;
pub mod traits;

pub use car::{Car, CarFilter};
pub use error::{Error, Result};
pub use traits::CatalogRepository;
