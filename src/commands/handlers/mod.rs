//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: start/help, add/list/remove, settings, when, export

pub mod export;
pub mod schedule;
pub mod settings;
pub mod utility;
pub mod vocab;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(vocab::VocabHandler),
        Arc::new(settings::SettingsHandler),
        Arc::new(schedule::WhenHandler),
        Arc::new(export::ExportHandler),
    ]
}
