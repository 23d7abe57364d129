//! CLI library components for the lineage explainer.

pub mod logging;
pub mod render;
