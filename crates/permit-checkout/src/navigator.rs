//! Navigation
//!
//! The flow's only exit on success: sending the user to the hosted payment
//! page. Browsers replace the whole document; other hosts decide for
//! themselves what "navigate" means.

use std::sync::{Mutex, PoisonError};

use crate::error::Result;

/// Performs the terminal redirect
pub trait Navigator {
    fn navigate(&self, url: &str) -> Result<()>;
}

/// Navigator that only remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        Ok(())
    }
}
