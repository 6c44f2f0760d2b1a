// econdata-core/src/infrastructure/adapters/mod.rs

pub mod http;
pub mod raw_store;
pub mod sink;

pub use http::ReqwestFetcher;
pub use raw_store::FsRawStore;
pub use sink::FsSink;
