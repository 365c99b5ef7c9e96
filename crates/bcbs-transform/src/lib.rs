pub mod error;
pub mod normalize;
pub mod percentile;
pub mod project;

pub use error::{Result, TransformError};
pub use normalize::{normalize_date, normalize_lab_value};
pub use percentile::{Gender, bmi_percentile, bmi_percentile_for};
pub use project::transform;
