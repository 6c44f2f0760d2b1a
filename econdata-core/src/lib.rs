// econdata-core/src/lib.rs

// 1. Documentation is encouraged, not enforced yet
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for the external collaborators: HTTP fetch, raw store, sink.
pub mod ports;

// 2. Domain (business core)
// Tables, bundles, transform recipes, validation rules, dataset catalog.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// reqwest fetcher, filesystem raw store and sink, configuration.
// Depends on Domain and Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Ingest, transform + publish, orchestration.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::EconError;
