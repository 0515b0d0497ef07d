//! Text rendering utilities.
//!
//! This module provides shared text rendering functionality:
//! - [`render_rich_text`] - Render an event description to styled ratatui Lines
//! - [`RichTextStyles`] - Style configuration for rich-text elements
//! - [`wrap_lines`] - Wrap styled lines to a width
//! - [`truncate_to_width`] - Unicode-aware truncation

mod rich_text;
mod styles;
mod width;
mod wrap;

pub use rich_text::{plain_text, render_rich_text};
pub use styles::RichTextStyles;
pub use width::{truncate_to_width, visual_width};
pub use wrap::wrap_lines;
