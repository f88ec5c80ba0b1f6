/// Resource limits for rule parsing and query resolution
///
/// These limits protect against runaway inputs while being generous enough
/// for every declared project type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum size of a single rule text in bytes
    /// Real usage: ~80 bytes, Limit: 4KB
    pub max_rule_bytes: usize,

    /// Maximum expression nesting depth
    /// Real usage: ~3 levels, Limit: 100
    pub max_expression_depth: usize,

    /// Maximum number of nested queries while resolving one subject
    /// Real usage: ~10 (railway steel), Limit: 256
    pub max_chain_depth: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_rule_bytes: 4 * 1024,
            max_expression_depth: 100,
            max_chain_depth: 256,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
