//! Canonical interface names.
//!
//! A canonical name is `JMP-<middle...>-<last>-<code>`: the base label's
//! dash-separated segments forced behind a `JMP` prefix, with the slot/port
//! code as the invariant suffix. Middle segments are shortened first so the
//! final segment and the code survive intact. Lengths count characters.

/// Default upper bound for canonical names.
pub const DEFAULT_MAX_NAME_LEN: usize = 25;

/// Literal first segment of every canonical name.
pub const NAME_PREFIX: &str = "JMP";

const SEPARATOR: char = '-';

/// Build the canonical name for `base` and `code`, aiming for `max_len`.
///
/// Never fails. The bound is best effort: once every shortenable segment is
/// down to one character the name may still exceed `max_len`.
///
/// ```rust,ignore
/// use onu_rewrite::build_canonical_name;
///
/// assert_eq!(build_canonical_name("OLT-CORE-ACCESS", "1/2", 25), "JMP-OLT-CORE-ACCESS-1/2");
/// ```
#[must_use]
pub fn build_canonical_name(base: &str, code: &str, max_len: usize) -> String {
    if base.is_empty() {
        return assemble(&[NAME_PREFIX.to_string()], code);
    }

    let mut parts: Vec<&str> = base.split(SEPARATOR).collect();
    if parts.first() != Some(&NAME_PREFIX) {
        parts.insert(0, NAME_PREFIX);
    }

    let (middle, last): (&[&str], &str) = match &parts[1..] {
        [] => (&[], ""),
        [only] => (&[], *only),
        [middle @ .., last] => (middle, *last),
    };

    let mut segments = vec![NAME_PREFIX.to_string()];
    for &part in middle {
        let candidate = if last.is_empty() {
            joined_len(&segments, &[part, code])
        } else {
            joined_len(&segments, &[part, last, code])
        };
        if candidate <= max_len {
            segments.push(part.to_string());
        } else {
            let keep = char_len(part).saturating_sub(candidate - max_len).max(1);
            segments.push(part.chars().take(keep).collect());
        }
    }

    if !last.is_empty() {
        segments.push(last.to_string());
    }

    let mut name = assemble(&segments, code);

    while char_len(&name) > max_len && segments.len() > 2 {
        let idx = segments.len() - 2;
        let width = char_len(&segments[idx]);
        if width <= 1 {
            break;
        }
        segments[idx] = segments[idx].chars().take(width - 1).collect();
        name = assemble(&segments, code);
    }

    name
}

fn assemble(segments: &[String], code: &str) -> String {
    let mut name = segments.join("-");
    name.push(SEPARATOR);
    name.push_str(code);
    name
}

/// Length of `segments` and `tail` joined with separators.
fn joined_len(segments: &[String], tail: &[&str]) -> usize {
    let chars: usize = segments.iter().map(|s| char_len(s)).sum::<usize>()
        + tail.iter().map(|s| char_len(s)).sum::<usize>();
    let pieces = segments.len() + tail.len();
    chars + pieces.saturating_sub(1)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
