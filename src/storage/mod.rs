//! Catalog storage that lives inside the process

pub mod in_memory;

pub use in_memory::SeedCatalog;
