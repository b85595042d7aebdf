/// State management module
///
/// This module handles all application state, including:
/// - The photo slot store (slots.rs)
/// - The once-per-session scatter layout (scatter.rs)
/// - The reveal/scatter session state machine (session.rs)

pub mod scatter;
pub mod session;
pub mod slots;
