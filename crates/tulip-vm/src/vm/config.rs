//! VM configuration

/// Default limit on nested calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum call frame depth; deeper calls fault with a stack overflow
    pub max_call_depth: usize,

    /// Log every executed instruction at `trace` level
    pub trace_execution: bool,

    /// Log the disassembly of every compiled unit at `debug` level
    pub print_code: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            trace_execution: false,
            print_code: false,
        }
    }
}
