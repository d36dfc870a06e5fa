mod common;
mod phrase_manager;

// Public API
pub use phrase_manager::display_phrase_manager;
