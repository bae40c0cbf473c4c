//! Theme and Colors
//!
//! Control role palette. Roles mirror the classic annotation-widget button
//! styles: info-blue choice buttons, a green submit, a yellow skip.

use ratatui::style::Color;

/// Discrete choice buttons
pub const CHOICE_BLUE: Color = Color::Rgb(90, 160, 230);

/// Submit button (slider and text modes)
pub const SUBMIT_GREEN: Color = Color::Rgb(120, 230, 120);

/// Skip button
pub const SKIP_YELLOW: Color = Color::Rgb(230, 200, 90);

/// Disabled controls after the queue is exhausted
pub const DISABLED_GRAY: Color = Color::Rgb(100, 100, 100);

/// Focused control text
pub const FOCUS_BLACK: Color = Color::Rgb(20, 20, 20);

/// Status/hint text
pub const DIM_GRAY: Color = Color::DarkGray;

/// Free-text entry content
pub const ENTRY_GREEN: Color = Color::Rgb(130, 220, 130);

/// Slider track
pub const TRACK_GRAY: Color = Color::Rgb(80, 80, 80);

/// Completion notice
pub const NOTICE_CYAN: Color = Color::Rgb(120, 200, 230);
