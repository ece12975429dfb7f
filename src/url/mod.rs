//! URL handling module for Kumo-Atlas
//!
//! This module provides the identity normalization used for page equality,
//! domain/authority extraction, and wildcard matching for exclude patterns.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_domain, same_authority};
pub use matcher::matches_wildcard;
pub use normalize::{normalize_parsed, normalize_url};
