//! The library code for the `showcase` portfolio generator. The architecture
//! can be generally broken down into two distinct steps:
//!
//! 1. Normalizing the projects document into a [`catalog::Catalog`]
//! 2. Rendering the catalog into tag pages on disk ([`write`])
//!
//! Of the two, the first step is the more involved. Each entry of the loosely
//! structured YAML document is validated and filled in with defaults
//! ([`project`]): its date is rewritten for display ([`date`]), its text
//! fields are rendered from markdown ([`markdown`]), and its link fields are
//! cleaned up ([`link`]). The accepted projects are then sorted by importance
//! and grouped into categories ([`tag`]), which are ordered by the document's
//! `tagOrder` list when it has one.
//!
//! The second step is pretty straight-forward: for the page listing every
//! project and for each category page, apply the template and write the
//! result to disk.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod catalog;
pub mod config;
pub mod date;
pub mod link;
pub mod markdown;
pub mod project;
pub mod tag;
pub mod value;
pub mod write;
