//! Markup-to-call-tree transformer.
//!
//! Turns an XML-like markup string (tags, attributes, nested children, inline
//! `{...}` expressions, `<>...</>` fragments) into a [`Node`] tree, and
//! optionally renders that tree as nested constructor-call text.
//!
//! Malformed input is reported inline as diagnostic nodes; only runaway input
//! (step or depth limits) fails a call.

pub mod attrs;
pub mod children;
pub mod context;
pub mod debug;
pub mod error;
pub mod perf_fixtures;
pub mod render;
pub mod scan;
pub mod traverse;

mod transform;
mod types;

#[cfg(all(test, feature = "perf-tests"))]
mod perf_guards_heavy;
#[cfg(test)]
mod perf_guards_smoke;

pub use crate::context::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_STEPS, TransformConfig, TransformContext, TransformStats,
};
pub use crate::error::{DiagnosticCode, TransformError};
pub use crate::render::{RenderConfig, render};
pub use crate::transform::{transform, transform_to_call_text, transform_with_config};
pub use crate::types::{Attribute, AttributeValue, Diagnostic, Element, Node, Span};
