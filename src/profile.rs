//! Profile storage: persist and load server connection profiles.

pub mod store;

pub use store::ProfileStore;
