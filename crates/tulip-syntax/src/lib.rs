//! TulipScript syntax
//!
//! Token definitions and the on-demand scanner used by the single-pass
//! compiler in `tulip-vm`.

pub mod scanner;
pub mod token;

// Re-export commonly used items
pub use scanner::{scan, unescape, Scanner};
pub use token::{Token, TokenKind};
