//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - small text helpers used by prompts and logs

pub mod error;
pub mod string;
