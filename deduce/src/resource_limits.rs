/// Resource limits to prevent abuse and keep recursion predictable
///
/// These limits protect against malicious inputs while being generous enough
/// for all legitimate rule files.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum file size in bytes
    /// Real usage: <1KB, Limit: 5MB
    pub max_file_size_bytes: usize,

    /// Maximum expression nesting depth
    /// Real usage: ~4 levels, Limit: 100
    pub max_expression_depth: usize,

    /// Maximum number of rules in one program
    pub max_rules: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024, // 5 MB
            max_expression_depth: 100,
            max_rules: 10_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
