//! # snack-core
//!
//! Core types, ID prefixes, and error types for snackbox.
//!
//! This crate provides the foundational types shared across all snackbox crates:
//! - Entity structs for the catalog (snacks, types, flavors, keywords)
//! - Display rows and per-snack metrics returned by search
//! - Search operator and tag dimension enums
//! - ID prefix constants
//! - Cross-cutting error types
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
