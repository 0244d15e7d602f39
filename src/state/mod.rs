/// State management module
///
/// This module handles all application state, including:
/// - The user's choices and photo load tracking (session.rs)
/// - Shared data structures (data.rs)
/// - Photo placement adjustments (edit.rs)

pub mod data;
pub mod edit;
pub mod session;
