pub mod palette;
pub mod svg;

pub use palette::{SECTION_COLORS, section_color};
pub use svg::{CanvasSize, render_section_map, write_svg};
