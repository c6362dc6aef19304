/// Compiler and linker diagnostics formatting
///
/// Diagnostics are surfaced whenever the driver produced any, successful
/// compiles included. They are copied into a bounded buffer first; overflow
/// is marked with a `...` line.

/// Format a diagnostics block for the log, or `None` when `log` is empty
///
/// `capacity` counts the terminating byte of a C buffer, so at most
/// `capacity - 1` bytes of text are kept.
pub(crate) fn format_info_log(title: &str, log: &str, capacity: usize) -> Option<String> {
    if log.is_empty() {
        return None;
    }

    let max_len = capacity.saturating_sub(1);
    let truncated = log.len() > max_len;
    let mut end = log.len().min(max_len);
    while !log.is_char_boundary(end) {
        end -= 1;
    }

    let header = format!("---------- {} ----------", title);
    let footer = "-".repeat(header.len());

    let mut block = String::with_capacity(end + header.len() * 2 + 8);
    block.push_str(&header);
    block.push('\n');
    block.push_str(log[..end].trim_end_matches('\n'));
    block.push('\n');
    if truncated {
        block.push_str("...\n");
    }
    block.push_str(&footer);
    Some(block)
}

#[cfg(test)]
#[path = "info_log_tests.rs"]
mod tests;
