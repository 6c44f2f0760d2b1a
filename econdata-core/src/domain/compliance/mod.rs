pub mod anomaly;

pub use anomaly::{AnomalyError, DatasetRunState, RowCountCheck};
