//! Threshold policy: which ceiling applies to which function.
//!
//! The policy is built once at startup and passed by reference; analysis
//! never mutates it. Complexity has a default ceiling plus exact
//! (file-suffix, function-name) override rows. The nesting ceiling is a
//! fixed constant and cannot be overridden.

/// Default per-function cyclomatic complexity ceiling.
pub const DEFAULT_COMPLEXITY_CEILING: u32 = 15;

/// Fixed control-flow nesting ceiling. Depth above this is a violation.
pub const MAX_NESTING_DEPTH: u32 = 4;

/// One override row: an exact (file-suffix, function-name) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdOverride {
    /// Suffix matched against the reported file path.
    pub file_suffix: String,
    /// Exact qualified function name.
    pub function: String,
    /// Complexity ceiling for the matched function.
    pub ceiling: u32,
}

/// Immutable complexity-ceiling lookup table.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    default_ceiling: u32,
    overrides: Vec<ThresholdOverride>,
}

impl ThresholdPolicy {
    /// Create a policy with the given default ceiling and no overrides.
    pub fn new(default_ceiling: u32) -> Self {
        Self {
            default_ceiling,
            overrides: Vec::new(),
        }
    }

    /// Add an override row.
    pub fn with_override(mut self, file_suffix: &str, function: &str, ceiling: u32) -> Self {
        self.overrides.push(ThresholdOverride {
            file_suffix: file_suffix.to_string(),
            function: function.to_string(),
            ceiling,
        });
        self
    }

    /// The ceiling applied to unmatched functions.
    pub fn default_ceiling(&self) -> u32 {
        self.default_ceiling
    }

    /// Look up the complexity ceiling for one function.
    ///
    /// The first row whose file suffix and function name both match wins;
    /// unmatched pairs fall through to the default.
    pub fn ceiling(&self, file: &str, qualified_name: &str) -> u32 {
        self.overrides
            .iter()
            .find(|o| file.ends_with(&o.file_suffix) && qualified_name == o.function)
            .map(|o| o.ceiling)
            .unwrap_or(self.default_ceiling)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLEXITY_CEILING)
    }
}
