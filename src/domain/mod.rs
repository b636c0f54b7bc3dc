pub mod article;
pub mod last_checked;

pub use article::{Article, Caption, UNKNOWN_AUTHOR};
pub use last_checked::LastChecked;
