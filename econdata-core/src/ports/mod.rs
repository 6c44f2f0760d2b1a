// econdata-core/src/ports/mod.rs
//
// What the pipeline needs from the outside world, without knowing how it is done.

pub mod fetcher;
pub mod raw_store;
pub mod sink;

pub use fetcher::Fetcher;
pub use raw_store::RawStore;
pub use sink::Sink;
