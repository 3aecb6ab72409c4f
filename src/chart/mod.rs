pub mod backend;
pub mod render;
pub mod smooth;
pub mod style;

pub use render::{display, render};
pub use style::ChartStyle;
