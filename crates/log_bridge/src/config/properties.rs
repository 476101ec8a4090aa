//! A reader for `key=value` properties resources.
//!
//! Supports the commonly used subset of the Java properties format: `#` and `!` comment
//! lines, `=` or `:` separators (or whitespace when neither is present), backslash escapes
//! and backslash line continuations.

use std::io::{self, BufRead};

/// Iterator over the `(key, value)` entries of a properties resource, in resource order.
///
/// Yields an error and stops when the underlying reader fails.
#[derive(Debug)]
pub(crate) struct Entries<R> {
    reader: R,
    failed: bool,
}

impl<R: BufRead> Entries<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            failed: false,
        }
    }

    /// Reads the next logical line, joining continued physical lines.
    fn next_logical_line(&mut self) -> io::Result<Option<String>> {
        let mut logical = String::new();
        let mut continued = false;

        loop {
            let mut physical = String::new();
            if self.reader.read_line(&mut physical)? == 0 {
                return Ok((continued || !logical.is_empty()).then_some(logical));
            }

            let physical = physical.trim_end_matches(['\n', '\r']);
            let physical = physical.trim_start();

            if !continued && (physical.is_empty() || physical.starts_with(['#', '!'])) {
                continue;
            }

            if ends_with_continuation(physical) {
                logical.push_str(physical.strip_suffix('\\').unwrap_or(physical));
                continued = true;
            } else {
                logical.push_str(physical);
                return Ok(Some(logical));
            }
        }
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = io::Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_logical_line() {
            Ok(Some(line)) => Some(Ok(split_entry(&line))),
            Ok(None) => None,
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

/// A line is continued when it ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line into an unescaped key and value.
fn split_entry(line: &str) -> (String, String) {
    let mut escaped = false;
    let mut separator = None;

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                separator = Some((index, index + c.len_utf8()));
                break;
            }
            c if c.is_whitespace() => {
                // Whitespace separates too, unless an explicit separator follows it.
                let after = line.get(index..).unwrap_or_default().trim_start();
                let skip = line.len() - after.len();
                let end = if after.starts_with(['=', ':']) {
                    skip + 1
                } else {
                    skip
                };
                separator = Some((index, end));
                break;
            }
            _ => (),
        }
    }

    let (key, value) = match separator {
        Some((start, end)) => (
            line.get(..start).unwrap_or_default(),
            line.get(end..).unwrap_or_default(),
        ),
        None => (line, ""),
    };

    (unescape(key.trim()), unescape(value.trim()))
}

fn unescape(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => unescaped.push('\t'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('f') => unescaped.push('\u{c}'),
            Some(other) => unescaped.push(other),
            None => (),
        }
    }

    unescaped
}

/// Parses a boolean the way properties consumers traditionally do: only `true`, in any
/// letter case, is true.
pub(crate) fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Read};

    use super::*;

    fn entries(input: &str) -> Vec<(String, String)> {
        Entries::new(input.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    fn entry(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn reads_entries_in_order() {
        let parsed = entries("a.B=debug\ndefault.log.level = info\nc.D:warn\n");
        assert_eq!(
            parsed,
            vec![
                entry("a.B", "debug"),
                entry("default.log.level", "info"),
                entry("c.D", "warn"),
            ]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let parsed = entries("# comment\n\n   ! another\n  a.B=trace\r\n");
        assert_eq!(parsed, vec![entry("a.B", "trace")]);
    }

    #[test]
    fn whitespace_separates_keys_without_separator() {
        assert_eq!(entries("a.B   error"), vec![entry("a.B", "error")]);
        assert_eq!(entries("a.B  =  error"), vec![entry("a.B", "error")]);
    }

    #[test]
    fn key_without_value_has_empty_value() {
        assert_eq!(entries("lonely.Key\n"), vec![entry("lonely.Key", "")]);
    }

    #[test]
    fn duplicate_keys_are_all_reported() {
        let parsed = entries("a.B=warn\na.B=trace\n");
        assert_eq!(parsed, vec![entry("a.B", "warn"), entry("a.B", "trace")]);
    }

    #[test]
    fn continuation_lines_are_joined() {
        let parsed = entries("force.tag=MY\\\n    APP\nnext=info");
        assert_eq!(parsed, vec![entry("force.tag", "MYAPP"), entry("next", "info")]);
    }

    #[test]
    fn escaped_separators_belong_to_the_key() {
        let parsed = entries("odd\\=key=info\\\\");
        assert_eq!(parsed, vec![entry("odd=key", "info\\")]);
    }

    #[test]
    fn booleans_follow_properties_conventions() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(""));
    }

    struct FailAfter {
        data: &'static [u8],
        served: bool,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("device gone"));
            }
            self.served = true;
            let len = self.data.len().min(buf.len());
            buf[..len].copy_from_slice(&self.data[..len]);
            Ok(len)
        }
    }

    #[test]
    fn stops_after_a_read_error() {
        let reader = BufReader::new(FailAfter {
            data: b"a.B=info\n",
            served: false,
        });
        let mut entries = Entries::new(reader);

        assert_eq!(entries.next().unwrap().unwrap(), entry("a.B", "info"));
        assert!(entries.next().unwrap().is_err());
        assert!(entries.next().is_none());
    }
}
