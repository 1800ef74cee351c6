// Queue Expression Domain Model
//
// Grammar (checked in this order):
//   name/N      repeat `name` N times (N > 0)
//   !@key, @key indirection through the assignment stored under `key`
//   !pat        remove accumulated queues matching `pat`
//   pat         add known queues matching `pat` (`*` = any substring)

/// Queue identifier as registered by the host job framework
pub type QueueName = String;

pub const NEGATION_PREFIX: char = '!';
pub const REFERENCE_PREFIX: char = '@';
pub const REPEAT_SEPARATOR: char = '/';

/// Upper bound for a single `/N` directive
pub const MAX_REPEAT_COUNT: usize = 10_000;

/// One token of the queue expression language, borrowed from its source string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueExpression<'a> {
    Repeat { inner: &'a str, count: usize },
    Reference { key: &'a str, negated: bool },
    Pattern { glob: &'a str, negated: bool },
}

impl<'a> QueueExpression<'a> {
    /// Classify a raw token. Never fails: anything unrecognised is a pattern.
    pub fn parse(raw: &'a str) -> Self {
        if let Some((inner, count)) = parse_repeat(raw) {
            return QueueExpression::Repeat { inner, count };
        }

        let (negated, rest) = match raw.strip_prefix(NEGATION_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        if let Some(key) = rest.strip_prefix(REFERENCE_PREFIX) {
            return QueueExpression::Reference {
                key: key.trim(),
                negated,
            };
        }

        QueueExpression::Pattern {
            glob: rest,
            negated,
        }
    }
}

/// `inner/N` with non-empty `inner` and a positive decimal `N`.
/// Counts above MAX_REPEAT_COUNT are clamped.
fn parse_repeat(raw: &str) -> Option<(&str, usize)> {
    let (inner, digits) = raw.rsplit_once(REPEAT_SEPARATOR)?;
    if inner.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let count = match digits.parse::<usize>() {
        Ok(0) => return None,
        Ok(n) => n.min(MAX_REPEAT_COUNT),
        // Only overflow can fail here (digits are validated above)
        Err(_) => MAX_REPEAT_COUNT,
    };

    Some((inner, count))
}

/// Strip a leading `!` if present, otherwise prepend one
pub fn toggle_negation(expr: &str) -> String {
    match expr.strip_prefix(NEGATION_PREFIX) {
        Some(rest) => rest.to_string(),
        None => format!("{}{}", NEGATION_PREFIX, expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_glob() {
        assert_eq!(
            QueueExpression::parse("paid_*"),
            QueueExpression::Pattern {
                glob: "paid_*",
                negated: false
            }
        );
        assert_eq!(
            QueueExpression::parse("!free_*"),
            QueueExpression::Pattern {
                glob: "free_*",
                negated: true
            }
        );
    }

    #[test]
    fn test_parse_repeat() {
        assert_eq!(
            QueueExpression::parse("paid_*/10"),
            QueueExpression::Repeat {
                inner: "paid_*",
                count: 10
            }
        );
        // Splits on the last slash
        assert_eq!(
            QueueExpression::parse("a/b/2"),
            QueueExpression::Repeat {
                inner: "a/b",
                count: 2
            }
        );
    }

    #[test]
    fn test_malformed_repeat_is_a_pattern() {
        for raw in ["a/0", "a/x", "a/", "/3", "a/-1", "a/ 2"] {
            assert_eq!(
                QueueExpression::parse(raw),
                QueueExpression::Pattern {
                    glob: raw,
                    negated: false
                },
                "token {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_huge_repeat_is_clamped() {
        assert_eq!(
            QueueExpression::parse("a/99999999999999999999999"),
            QueueExpression::Repeat {
                inner: "a",
                count: MAX_REPEAT_COUNT
            }
        );
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(
            QueueExpression::parse("@workers"),
            QueueExpression::Reference {
                key: "workers",
                negated: false
            }
        );
        assert_eq!(
            QueueExpression::parse("!@ workers "),
            QueueExpression::Reference {
                key: "workers",
                negated: true
            }
        );
        assert_eq!(
            QueueExpression::parse("@"),
            QueueExpression::Reference {
                key: "",
                negated: false
            }
        );
    }

    #[test]
    fn test_toggle_negation() {
        assert_eq!(toggle_negation("q1"), "!q1");
        assert_eq!(toggle_negation("!q1"), "q1");
        assert_eq!(toggle_negation("@other"), "!@other");
        assert_eq!(toggle_negation("!!q1"), "!q1");
    }
}
