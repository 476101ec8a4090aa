//! Compression of hierarchical logger names into bounded-length platform tags.

use std::borrow::Cow;

/// The longest tag the platform accepts without truncating it.
pub const MAX_TAG_LEN: usize = 23;

/// Inserted between the head and tail of a leaf segment too long to keep whole.
const ELLIPSIS: &str = "...";

/// Shortens a dotted logger name so that it is at most `max_len` characters long.
///
/// Names that already fit are returned unchanged. Otherwise the leaf segment (the part after
/// the last `.`) is kept whole when possible, preceded by the first letter of every parent
/// segment if that still fits (`com.example.service.Foo` becomes `c.e.s.Foo`). A leaf segment
/// that does not fit on its own is cut in the middle: its head and tail are kept around an
/// ellipsis, for example `VeryLongCl...edingLimit` for a 23 character limit.
///
/// Lengths are counted in characters, not bytes. The result never exceeds `max_len`, so
/// shortening a shortened tag is a no-op.
///
/// # Example
///
/// ```
/// use log_bridge::tag::{MAX_TAG_LEN, shorten};
///
/// assert_eq!(shorten("com.example.Foo", MAX_TAG_LEN), "com.example.Foo");
/// assert_eq!(
///     shorten("com.example.service.internal.Handler", MAX_TAG_LEN),
///     "c.e.s.i.Handler"
/// );
/// assert_eq!(
///     shorten("com.example.service.VeryLongClassNameExceedingLimit", MAX_TAG_LEN),
///     "VeryLongCl...edingLimit"
/// );
/// ```
pub fn shorten(name: &str, max_len: usize) -> Cow<'_, str> {
    if name.chars().count() <= max_len {
        return Cow::Borrowed(name);
    }

    // Trailing dots name no segment.
    let trimmed = name.trim_end_matches('.');
    if trimmed.is_empty() {
        return Cow::Owned(cut_in_middle(name, max_len));
    }

    let (parents, leaf) = match trimmed.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, trimmed),
    };
    let leaf_len = leaf.chars().count();

    if leaf_len < max_len {
        // Each parent segment costs one letter plus a dot.
        let abbreviated =
            parents.filter(|parents| parents.split('.').count() * 2 + leaf_len <= max_len);
        return match abbreviated {
            Some(parents) => {
                let mut tag = String::with_capacity(max_len);
                for segment in parents.split('.') {
                    tag.extend(segment.chars().next());
                    tag.push('.');
                }
                tag.push_str(leaf);
                Cow::Owned(tag)
            }
            None => Cow::Borrowed(leaf),
        };
    }

    Cow::Owned(cut_in_middle(leaf, max_len))
}

/// Keeps equally long head and tail portions of `segment` around an [`ELLIPSIS`].
fn cut_in_middle(segment: &str, max_len: usize) -> String {
    let Some(room) = max_len.checked_sub(ELLIPSIS.len()).filter(|room| *room > 0) else {
        return segment.chars().take(max_len).collect();
    };
    let half = room / 2;
    let skip = segment.chars().count().saturating_sub(half);

    let mut tag = String::with_capacity(max_len);
    tag.extend(segment.chars().take(half));
    tag.push_str(ELLIPSIS);
    tag.extend(segment.chars().skip(skip));
    tag
}

/// Builds the prefix written in front of every message when the forced tag is prepended.
///
/// The tag is right-padded with spaces to `max_len` characters so that messages from
/// different loggers line up, and followed by `": "`.
pub fn prepend_prefix(tag: &str, max_len: usize) -> String {
    format!("{tag:<max_len$}: ")
}
