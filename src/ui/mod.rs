//! UI components for atelier.
//!
//! This module contains:
//! - layout: Main layout rendering
//! - input: Keyboard input handling
//! - picker: File selection from typed input
//! - widgets: Reusable UI widgets

pub mod input;
pub mod layout;
pub mod picker;
pub mod widgets;
