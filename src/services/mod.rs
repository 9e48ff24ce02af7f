//! Business logic services
//!
//! Kept separate from the HTTP handlers so the same logic can be called
//! from tests and other front ends.

pub mod company_service;

pub use company_service::CompanyService;
