pub mod error;
pub mod issue;
pub mod types;

pub use error::*;
pub use issue::{ClosedIssue, OpenIssue, ReleaseRecord};
pub use types::*;
