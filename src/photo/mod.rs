/// Photo decoding module
///
/// This module handles:
/// - Decoding the user's photo off the UI thread
/// - The list of file types offered by the picker

pub mod loader;
