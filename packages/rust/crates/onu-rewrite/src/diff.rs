//! Dry-run previews as unified diffs (`similar` crate).

use similar::{ChangeTag, TextDiff};

/// Unified diff between the original and rewritten script.
///
/// Three lines of context, `--- a/<label>` / `+++ b/<label>` headers, `...`
/// between hunks. Empty when nothing changed.
#[must_use]
pub fn generate_unified_diff(label: &str, original: &str, modified: &str) -> String {
    if original == modified {
        return String::new();
    }

    let diff = TextDiff::from_lines(original, modified);
    let mut output = format!("--- a/{label}\n+++ b/{label}\n");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                output.push_str(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renamed_line() {
        let diff = generate_unified_diff(
            "olt.txt",
            "interface x\n  name foo\n",
            "interface x\n  name JMP-foo-1/1\n",
        );
        assert!(diff.starts_with("--- a/olt.txt\n+++ b/olt.txt\n"));
        assert!(diff.contains("-  name foo\n"));
        assert!(diff.contains("+  name JMP-foo-1/1\n"));
    }

    #[test]
    fn test_no_changes() {
        assert!(generate_unified_diff("olt.txt", "same\n", "same\n").is_empty());
    }
}
