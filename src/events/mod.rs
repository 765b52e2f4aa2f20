//! Message types exchanged across systems.
//!
//! Submodules:
//! - [`audio`] – commands for the background audio thread and its replies
pub mod audio;
