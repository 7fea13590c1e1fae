// src/storage/mod.rs

//! Durable export of admitted profiles.

mod csv;

pub use csv::CsvSink;
