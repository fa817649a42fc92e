//! Merging of captured stdout and stderr into one text report.

/// Delimiter placed between stdout and a non-empty stderr.
pub const STDERR_DELIMITER: &str = "\nErrors:\n";

/// Decode both streams and join them.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing. When stderr
/// decodes to an empty string the result is stdout alone.
pub fn merge_streams(stdout: &[u8], stderr: &[u8]) -> String {
    let mut merged = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr);

    if !stderr.is_empty() {
        merged.push_str(STDERR_DELIMITER);
        merged.push_str(&stderr);
    }

    merged
}
