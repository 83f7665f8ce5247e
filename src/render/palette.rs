use crate::domain::COLOR_CYCLE;

/// Semi-transparent section fills, indexed by `Section::color_tag`
pub const SECTION_COLORS: [&str; COLOR_CYCLE] = [
    "rgba(233, 118, 43, 0.5)",
    "rgba(76, 175, 80, 0.5)",
    "rgba(33, 150, 243, 0.5)",
    "rgba(156, 39, 176, 0.5)",
    "rgba(255, 235, 59, 0.5)",
    "rgba(0, 188, 212, 0.5)",
    "rgba(255, 87, 34, 0.5)",
    "rgba(121, 85, 72, 0.5)",
    "rgba(63, 81, 181, 0.5)",
    "rgba(139, 195, 74, 0.5)",
];

pub const BOUNDARY_STROKE: &str = "#333333";
pub const SECTION_STROKE: &str = "#E9762B";
pub const MARKER_FILL: &str = "#000000";

pub fn section_color(color_tag: u8) -> &'static str {
    SECTION_COLORS[color_tag as usize % COLOR_CYCLE]
}
