pub mod buffer;
pub mod difference;
pub mod proj;

pub use buffer::build_buffer;
pub use difference::TrailClipper;
pub use proj::{Reprojector, is_geographic};
