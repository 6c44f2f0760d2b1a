pub mod bundle;
pub mod compliance;
pub mod datasets;
pub mod dates;
pub mod error;
pub mod metadata;
pub mod table;
pub mod transform;
pub mod validation;

// Convenience re-exports to keep imports short elsewhere
pub use bundle::RawBundle;
pub use error::DomainError;
pub use metadata::DatasetMetadata;
pub use table::{Column, ColumnData, ColumnType, Table};
