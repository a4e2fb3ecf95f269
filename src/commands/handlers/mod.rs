//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod info;
pub mod remind;

use std::sync::Arc;

use super::handler::TextCommandHandler;

/// Create all keyword command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn TextCommandHandler>> {
    vec![
        Arc::new(info::HelpHandler),
        Arc::new(info::AboutHandler),
        Arc::new(remind::ListHandler),
        Arc::new(remind::RemoveHandler),
    ]
}
