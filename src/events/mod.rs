//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`tumble`] – tumble lifecycle events and the observers that count them
pub mod audio;
pub mod tumble;
