pub mod health;
pub mod index;
pub mod ingest;
pub mod summary;

pub use health::health_check;
pub use index::index;
pub use ingest::{add_behavior, add_interaction, add_upload};
pub use summary::summary;
