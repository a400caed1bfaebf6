//! Domain types shared across Reppay services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` only converts to and
//! from their wire/storage strings.

pub mod amount;
pub mod escrow;
pub mod wallet;
