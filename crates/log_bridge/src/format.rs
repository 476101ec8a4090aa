//! Substitution of positional arguments into message templates.

use std::fmt::{self, Write};

/// Turns a message template and its arguments into the final message.
pub trait MessageFormatter: Send + Sync {
    /// Formats `template` with `args`.
    fn format(&self, template: &str, args: &[&dyn fmt::Display]) -> String;
}

/// Replaces each `{}` anchor in a template with the next argument.
///
/// An anchor preceded by a backslash (`\{}`) is kept literally, without the backslash; a
/// doubled backslash (`\\{}`) yields a single backslash followed by the argument. Anchors left
/// over once the arguments run out are kept literally, and extra arguments are ignored.
///
/// # Example
///
/// ```
/// use log_bridge::{AnchorFormatter, MessageFormatter};
///
/// let message = AnchorFormatter.format("Connected to {} in {} ms", &[&"db-1", &42]);
/// assert_eq!(message, "Connected to db-1 in 42 ms");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorFormatter;

const ANCHOR: &str = "{}";

impl MessageFormatter for AnchorFormatter {
    fn format(&self, template: &str, args: &[&dyn fmt::Display]) -> String {
        let mut message = String::with_capacity(template.len());
        let mut args = args.iter();
        let mut rest = template;

        while let Some(position) = rest.find(ANCHOR) {
            let (before, after) = rest.split_at(position);
            rest = after.get(ANCHOR.len()..).unwrap_or_default();

            match before.strip_suffix('\\') {
                Some(unescaped) if !unescaped.ends_with('\\') => {
                    message.push_str(unescaped);
                    message.push_str(ANCHOR);
                }
                // A doubled backslash escapes itself; keep one and substitute as usual.
                doubled => {
                    message.push_str(doubled.unwrap_or(before));
                    Self::substitute(&mut message, args.next());
                }
            }
        }

        message.push_str(rest);
        message
    }
}

impl AnchorFormatter {
    fn substitute(message: &mut String, arg: Option<&&dyn fmt::Display>) {
        match arg {
            Some(arg) => {
                // Writing into a `String` cannot fail.
                let _ = write!(message, "{arg}");
            }
            None => message.push_str(ANCHOR),
        }
    }
}
