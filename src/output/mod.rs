//! Output shaping.
//!
//! Captured process output goes through two steps before it is returned:
//! - merging stdout and stderr with a labelled delimiter
//! - truncating the merged text to the configured character budget
//!
//! # Example
//!
//! ```
//! use shell_gate::output::{merge_streams, truncate_output};
//!
//! let merged = merge_streams(b"1234567890ABC\n", b"");
//! let report = truncate_output(merged, 10);
//! assert_eq!(
//!     report,
//!     "1234567890\n... Output truncated (total length: 14 characters)"
//! );
//! ```

mod merge;
mod truncate;

pub use merge::{merge_streams, STDERR_DELIMITER};
pub use truncate::truncate_output;
