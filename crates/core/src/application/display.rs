// Display Formatter - compact view of a resolved queue list

use crate::domain::QueueName;

/// Collapse runs of identical names into `name/count`.
///
/// Input is expected sorted (as returned by the resolver) so that equal names
/// are adjacent. A name seen once is rendered as-is.
///
/// # Example
/// ```text
/// ["a", "a", "a", "b"] -> ["a/3", "b"]
/// ```
pub fn collapse_repeats(sorted: &[QueueName]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();
    let mut last: Option<&str> = None;
    let mut count = 0usize;

    for queue in sorted {
        if last == Some(queue.as_str()) {
            count += 1;
            if let Some(slot) = expanded.last_mut() {
                *slot = format!("{}/{}", queue, count);
            }
        } else {
            expanded.push(queue.clone());
            last = Some(queue.as_str());
            count = 1;
        }
    }

    expanded
}
