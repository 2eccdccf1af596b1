pub mod cbs;
pub mod cli;
pub mod config;
pub mod error;
pub mod git_ops;
pub mod prereqs;
pub mod router;
pub mod srpm;
pub mod ui;

pub use error::{CbsPublishError, Result};
