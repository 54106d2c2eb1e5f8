//! Utility functions and helper macros used throughout the doco crate.
//!
//! - The crate-wide rayon [`THREAD_POOL`] used by the parallel per-transcript
//!   stages, sized by the `DOCO_NUM_THREADS` environment variable.
//! - The builder-style `with_*` method macro.
//! - Small helpers for parsing nullable string cells.

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

pub const NUM_THREADS_ENV: &str = "DOCO_NUM_THREADS";

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var(NUM_THREADS_ENV)
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

/// Returns `None` for cells that represent a missing value in annotation
/// tables (empty, `NA`, `.`).
pub fn non_empty_cell(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        None | Some("") | Some("NA") | Some(".") => None,
        Some(v) => Some(v),
    }
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_cell() {
        assert_eq!(non_empty_cell(None), None);
        assert_eq!(non_empty_cell(Some("")), None);
        assert_eq!(non_empty_cell(Some("NA")), None);
        assert_eq!(non_empty_cell(Some(" . ")), None);
        assert_eq!(non_empty_cell(Some(" PF00069 ")), Some("PF00069"));
    }

    #[test]
    fn test_thread_pool_has_threads() {
        assert!(n_threads() >= 1);
    }
}
