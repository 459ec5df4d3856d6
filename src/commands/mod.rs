//! # Command System
//!
//! Chat command handling: `/start`, `/help`, `/add`, `/list`, `/remove`,
//! `/settings`, `/when`, `/export`. Handlers are transport-neutral; the
//! update loop parses incoming text and dispatches through the registry.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use context::CommandContext;
pub use handler::{CommandHandler, CommandRequest};
pub use registry::CommandRegistry;

/// Command reference shown by `/help` and on unknown input.
pub const HELP: &str = "Commands:\n\
/add <word or phrase> — add an item\n\
/list — first 50 items\n\
/remove <id> — remove an item\n\
/settings <count> <start> <end> [timezone] — reminder window\n\
/when — today's remaining times\n\
/export — answers as CSV\n\
/help — this reference";
