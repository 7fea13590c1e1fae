// src/pipeline/mod.rs

//! Admission pipeline for extracted profiles.
//!
//! Every candidate runs through an ordered chain of stages
//! (email validation → brand-name filter → deduplication); each stage
//! either passes the record on, possibly mutated, or rejects it with a
//! per-record reason. Rejections are counted, never fatal.

mod admission;
mod brand;
mod dedup;
mod stage;
mod validate;

pub use admission::AdmissionPipeline;
pub use brand::BrandNameFilter;
pub use dedup::Deduplication;
pub use stage::{AdmissionStage, Rejection};
pub use validate::EmailValidation;
