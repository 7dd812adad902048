#![forbid(unsafe_code)]

//! Tree input model, JSON tree parsing and YAML configuration.
//!
//! The layout engine itself lives in `treescaper-layout`; this crate only knows how to load and
//! validate what the engine consumes.

pub mod config;
pub mod error;
pub mod model;
pub mod parse;

pub use config::ScaperConfig;
pub use error::{Error, Result};
pub use model::{MAX_TREE_DEPTH, NodeKind, TreeNode};
pub use parse::{parse_tree, parse_tree_value};
