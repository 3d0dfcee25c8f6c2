//! Post collection types and snapshot access

pub mod provider;
pub mod records;

pub use provider::SnapshotProvider;
pub use records::Post;
