//! Remote field state
//!
//! Each backend-fed field (dropdown lists, catalog, AI result...) is a small
//! state machine. A load is stamped with a generation; a response carrying
//! any other generation is stale and dropped.

use serde::{Deserialize, Serialize};

/// Monotonic request stamp of one dependent fetch chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// Advance and return the new stamp
    pub fn next(&mut self) -> Generation {
        self.0 += 1;
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Remote<T> {
    Idle,
    Loading {
        generation: Generation,
    },
    Error(String),
    Loaded(T),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Idle
    }
}

impl<T> Remote<T> {
    pub fn begin(&mut self, generation: Generation) {
        *self = Remote::Loading { generation };
    }

    /// Apply a response; returns false (and leaves state alone) when stale
    pub fn resolve(&mut self, generation: Generation, result: Result<T, String>) -> bool {
        match self {
            Remote::Loading { generation: current } if *current == generation => {
                *self = match result {
                    Ok(value) => Remote::Loaded(value),
                    Err(reason) => Remote::Error(reason),
                };
                true
            }
            _ => {
                log::warn!("dropping stale response (generation {})", generation.0);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Remote::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading { .. })
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Remote::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_monotonic() {
        let mut counter = Generation::default();
        let a = counter.next();
        let b = counter.next();
        assert!(b > a);
        assert_eq!(counter, b);
    }

    #[test]
    fn test_resolve_current() {
        let mut counter = Generation::default();
        let mut field: Remote<Vec<u32>> = Remote::Idle;
        let g = counter.next();
        field.begin(g);
        assert!(field.is_loading());
        assert!(field.resolve(g, Ok(vec![1, 2])));
        assert_eq!(field.loaded(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut counter = Generation::default();
        let mut field: Remote<&str> = Remote::Idle;
        let old = counter.next();
        field.begin(old);
        let new = counter.next();
        field.begin(new);

        assert!(!field.resolve(old, Ok("old")));
        assert!(field.is_loading());
        assert!(field.resolve(new, Err("boom".into())));
        assert_eq!(field.error(), Some("boom"));
    }

    #[test]
    fn test_resolve_after_reset_is_dropped() {
        let mut field: Remote<u8> = Remote::Idle;
        let g = Generation(4);
        field.begin(g);
        field.reset();
        assert!(!field.resolve(g, Ok(1)));
        assert_eq!(field, Remote::Idle);
    }
}
