// Utility Module
// Key persistence helpers

pub mod file_ops;

pub use file_ops::{load_keys, save_keys};
