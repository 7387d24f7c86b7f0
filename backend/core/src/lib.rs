pub mod error;
pub mod traits;
pub mod types;

pub use error::SnapError;
pub use traits::Matcher;
pub use types::{AnalysisError, AnalysisResponse};
