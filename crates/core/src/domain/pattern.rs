// Glob pattern compilation for queue expressions

use regex::Regex;
use tracing::warn;

pub const WILDCARD: char = '*';

/// Compiled glob: `*` matches any (possibly empty) substring, every other
/// character matches itself. Anchored at both ends.
#[derive(Debug, Clone)]
pub struct QueuePattern {
    glob: String,
    regex: Option<Regex>,
}

impl QueuePattern {
    pub fn compile(glob: &str) -> Self {
        let body = glob
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = match Regex::new(&format!("^{}$", body)) {
            Ok(re) => Some(re),
            Err(e) => {
                // Size limits only; fall back to exact comparison
                warn!(glob = %glob, error = %e, "Glob did not compile, matching literally");
                None
            }
        };

        Self {
            glob: glob.to_string(),
            regex,
        }
    }

    pub fn has_wildcard(&self) -> bool {
        self.glob.contains(WILDCARD)
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(name),
            None => self.glob == name,
        }
    }

    /// The pattern text, used as a queue name when nothing matched
    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_matches_everything() {
        let p = QueuePattern::compile("*");
        assert!(p.is_match("a"));
        assert!(p.is_match(""));
        assert!(p.has_wildcard());
    }

    #[test]
    fn test_prefix_infix_suffix() {
        assert!(QueuePattern::compile("paid_*").is_match("paid_x"));
        assert!(!QueuePattern::compile("paid_*").is_match("unpaid_x"));
        assert!(QueuePattern::compile("*high*").is_match("very_high_prio"));
        assert!(QueuePattern::compile("*_low").is_match("mail_low"));
        assert!(!QueuePattern::compile("*_low").is_match("mail_low2"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let p = QueuePattern::compile("a.b");
        assert!(p.is_match("a.b"));
        assert!(!p.is_match("axb"));

        let p = QueuePattern::compile("jobs(1)+");
        assert!(p.is_match("jobs(1)+"));
        assert!(!p.has_wildcard());

        let p = QueuePattern::compile(r"a\*");
        assert!(p.is_match(r"a\anything"));
        assert!(!p.is_match("a*"));
    }

    #[test]
    fn test_anchored() {
        let p = QueuePattern::compile("mail");
        assert!(p.is_match("mail"));
        assert!(!p.is_match("mailer"));
        assert!(!p.is_match("email"));
    }
}
