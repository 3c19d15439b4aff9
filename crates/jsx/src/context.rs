//! Per-call transform context: limits, step budget, depth tracking, counters.
//!
//! Invariants:
//! - A context is created for exactly one `transform` call and dropped with it.
//! - Every scanning loop iteration is charged with [`TransformContext::tick`], so
//!   the total work of a call is bounded by `max_steps` regardless of input shape.
//! - Recursion (element transform and nested element skipping) goes through
//!   [`TransformContext::nested`], so stack growth is bounded by `max_depth`.
//! - A context scans one input buffer and its prefixes. Scan results are
//!   remembered per call, keyed by start offset and scanned buffer length, so
//!   a region is scanned once however many layers ask about it.

use crate::error::{DiagnosticCode, TransformError};
use crate::types::{Diagnostic, Span};
use std::collections::HashMap;

/// Default ceiling on markup nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Default ceiling on scan steps per call.
pub const DEFAULT_MAX_STEPS: u64 = 1 << 26;

/// Configuration for a transform call.
#[derive(Clone, Debug)]
pub struct TransformConfig {
    /// Maximum element/fragment nesting depth before the call fails.
    pub max_depth: usize,
    /// Maximum number of scan steps before the call fails.
    pub max_steps: u64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Minimal transform instrumentation. Never affects output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub steps: u64,
    pub max_depth_seen: usize,
    pub elements: u64,
    pub expressions: u64,
    pub diagnostics: u64,
    /// Scans answered from earlier results instead of rescanning.
    pub memo_hits: u64,
}

/// Scanner whose result is remembered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ScanKind {
    Expression,
    OpenTag,
    Element,
}

/// `(kind, start, buffer length)` to end offset, `None` when the scan failed.
type ScanMemo = HashMap<(ScanKind, usize, usize), Option<usize>>;

#[derive(Debug)]
pub struct TransformContext {
    config: TransformConfig,
    depth: usize,
    stats: TransformStats,
    memo: ScanMemo,
}

impl TransformContext {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            depth: 0,
            stats: TransformStats::default(),
            memo: ScanMemo::new(),
        }
    }

    /// Charge one scan step against the budget.
    #[inline]
    pub fn tick(&mut self) -> Result<(), TransformError> {
        self.stats.steps = self.stats.steps.saturating_add(1);
        if self.stats.steps > self.config.max_steps {
            log::warn!(
                target: "jsx.transform",
                "step limit exceeded: limit={} depth={}",
                self.config.max_steps,
                self.depth
            );
            return Err(TransformError::StepLimitExceeded {
                limit: self.config.max_steps,
            });
        }
        Ok(())
    }

    /// Run `f` one nesting level deeper.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, TransformError>,
    ) -> Result<T, TransformError> {
        if self.depth >= self.config.max_depth {
            log::warn!(
                target: "jsx.transform",
                "depth limit exceeded: limit={} steps={}",
                self.config.max_depth,
                self.stats.steps
            );
            return Err(TransformError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        self.stats.max_depth_seen = self.stats.max_depth_seen.max(self.depth);
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn record_element(&mut self) {
        self.stats.elements += 1;
    }

    pub fn record_expression(&mut self) {
        self.stats.expressions += 1;
    }

    /// Build a diagnostic for `src[span]`, count it and log it.
    pub fn diagnostic(&mut self, code: DiagnosticCode, src: &str, span: Span) -> Diagnostic {
        let diag = Diagnostic::new(code, src, span);
        self.stats.diagnostics += 1;
        log::debug!(
            target: "jsx.transform",
            "{} at {}..{}",
            diag.message(),
            span.start,
            span.end
        );
        diag
    }

    /// Earlier result of a `kind` scan from `start` over a buffer of `len` bytes.
    pub(crate) fn recall(
        &mut self,
        kind: ScanKind,
        start: usize,
        len: usize,
    ) -> Option<Option<usize>> {
        let found = self.memo.get(&(kind, start, len)).copied();
        if found.is_some() {
            self.stats.memo_hits += 1;
        }
        found
    }

    pub(crate) fn remember(
        &mut self,
        kind: ScanKind,
        start: usize,
        len: usize,
        end: Option<usize>,
    ) {
        self.memo.insert((kind, start, len), end);
    }

    /// Return a copy of current instrumentation counters.
    pub fn stats(&self) -> TransformStats {
        self.stats
    }
}

impl Default for TransformContext {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}
