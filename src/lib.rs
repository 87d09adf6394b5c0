#![doc(test(attr(deny(warnings))))]

//! Dynaform renders a fixed catalogue of form schemas into editable forms,
//! tracks completion progress and keeps submitted records in memory with
//! edit and delete support.

pub mod cli;
pub mod config;
pub mod errors;
pub mod forms;
pub mod registry;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Dynaform tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
