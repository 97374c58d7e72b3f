//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, banner, course grid, detail and status bar
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling

pub mod input;
pub mod render;
pub mod styles;
