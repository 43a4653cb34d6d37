#![doc = include_str!("../README.md")]

pub mod distance;
mod error;
mod heap;
pub mod kdtree;
mod linear;
pub mod loader;
mod point;
mod r#type;

pub use distance::{DistanceMetric, EuclideanDistance, PlanarDistance};
pub use error::{GeoNearestError, Result};
pub use heap::Neighbor;
pub use kdtree::{build_index, nearest, KDTree, KDTreeBuilder, KDTreeIndex};
pub use linear::{nearest_linear, nearest_linear_with_metric};
pub use loader::{load_file, parse_record, read_records};
pub use point::{Axis, Point};
pub use r#type::CoordNum;
