//! Secret redaction applied to raw input before detection and parsing.
//!
//! Rules run in a fixed order. Card numbers are masked before any rule that
//! could consume a shorter digit run, and separators never cross a newline so
//! the line structure seen by the parsers is unchanged.

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

/// Placeholder tokens written in place of secrets. None of them can be
/// matched by a rule, and a credential whose whole value is one is left
/// alone, which keeps redaction idempotent.
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL]";
pub const CARD_PLACEHOLDER: &str = "[CARD]";
pub const TOKEN_PLACEHOLDER: &str = "[TOKEN]";
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";
pub const SECRET_PLACEHOLDER: &str = "[SECRET]";

const PLACEHOLDERS: [&str; 5] = [
    EMAIL_PLACEHOLDER,
    CARD_PLACEHOLDER,
    TOKEN_PLACEHOLDER,
    REDACTED_PLACEHOLDER,
    SECRET_PLACEHOLDER,
];

lazy_static! {
    static ref RE_EMAIL: Regex =
        Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap();
    static ref RE_CARD: Regex = Regex::new(r"\b\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{4}\b").unwrap();
    static ref RE_BEARER: Regex = Regex::new(r"(?i)\bbearer[ \t]+[A-Za-z0-9._~+/=-]{8,}").unwrap();
    static ref RE_CREDENTIAL: Regex = Regex::new(
        r"(?i)\b(password|passwd|pwd|secret|token|api[ _-]?key|key)[ \t]*[:=][ \t]*(\S+)"
    )
    .unwrap();
    static ref RE_API_KEY: Regex = Regex::new(r"(?i)\b(?:sk|pk)-[A-Za-z0-9]{20,}\b").unwrap();
}

/// Text after redaction, plus how many substitutions were made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedText {
    pub text: String,
    pub replacements: usize,
}

impl RedactedText {
    /// Wrap text that is passed through without redaction
    pub fn unredacted(text: &str) -> Self {
        Self {
            text: text.to_string(),
            replacements: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

enum Replacement {
    Fixed(&'static str),
    /// Keep the key name, mask the value
    Credential,
}

struct Rule {
    name: &'static str,
    regex: &'static Regex,
    replacement: Replacement,
}

fn rules() -> [Rule; 5] {
    [
        Rule { name: "email", regex: &RE_EMAIL, replacement: Replacement::Fixed(EMAIL_PLACEHOLDER) },
        Rule { name: "card", regex: &RE_CARD, replacement: Replacement::Fixed(CARD_PLACEHOLDER) },
        Rule { name: "bearer", regex: &RE_BEARER, replacement: Replacement::Fixed("Bearer [TOKEN]") },
        Rule { name: "credential", regex: &RE_CREDENTIAL, replacement: Replacement::Credential },
        Rule { name: "api_key", regex: &RE_API_KEY, replacement: Replacement::Fixed(SECRET_PLACEHOLDER) },
    ]
}

/// Mask emails, card numbers, bearer tokens, credential assignments and API keys.
pub fn redact(text: &str) -> RedactedText {
    let mut current = text.to_string();
    let mut replacements = 0;

    for rule in rules() {
        let mut hits = 0;
        let replaced = rule.regex.replace_all(&current, |caps: &Captures| {
            match rule.replacement {
                Replacement::Fixed(token) => {
                    hits += 1;
                    token.to_string()
                }
                Replacement::Credential => {
                    let value = &caps[2];
                    if PLACEHOLDERS.contains(&value) {
                        caps[0].to_string()
                    } else {
                        hits += 1;
                        format!("{}: {}", &caps[1], REDACTED_PLACEHOLDER)
                    }
                }
            }
        });
        let replaced = replaced.into_owned();
        if hits > 0 {
            debug!(rule = rule.name, hits = hits; "Redacted sensitive text");
        }
        replacements += hits;
        current = replaced;
    }

    RedactedText {
        text: current,
        replacements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_masked() {
        let out = redact("Login\npassword: hunter2\nDone");
        assert!(!out.text.contains("hunter2"));
        assert_eq!(out.text, "Login\npassword: [REDACTED]\nDone");
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn test_email_and_card() {
        let out = redact("Mail bob@example.com about 4111 1111 1111 1111");
        assert_eq!(out.text, "Mail [EMAIL] about [CARD]");
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn test_card_does_not_span_lines() {
        let input = "1111\n2222\n3333\n4444";
        let out = redact(input);
        assert_eq!(out.text, input);
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn test_bearer_and_api_key() {
        let out = redact("Authorization: Bearer abc.def.ghi123\nuse sk-ABCDEFGHIJKLMNOPQRSTUV");
        assert_eq!(out.text, "Authorization: Bearer [TOKEN]\nuse [SECRET]");
    }

    #[test]
    fn test_credential_keeps_key_name() {
        assert_eq!(redact("api_key=xyz987").text, "api_key: [REDACTED]");
        assert_eq!(redact("TOKEN = abc").text, "TOKEN: [REDACTED]");
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let inputs = [
            "password: hunter2",
            "token: Bearer abcdefgh12345",
            "key=carol@example.org",
            "card 1234-5678-9012-3456 and pwd=letmein",
            "password: ab@cd.efgh!Xy9secret",
        ];
        for input in inputs {
            let once = redact(input);
            let twice = redact(&once.text);
            assert_eq!(once.text, twice.text, "input: {input}");
            assert_eq!(twice.replacements, 0, "input: {input}");
        }
    }

    #[test]
    fn test_credential_holding_an_email_is_masked_whole() {
        let out = redact("password: ab@cd.efgh!Xy9secret");
        assert_eq!(out.text, "password: [REDACTED]");
        assert_eq!(out.replacements, 2);
        // a value that is only a placeholder is not masked again
        assert_eq!(redact("key: bob@example.com").text, "key: [EMAIL]");
    }

    #[test]
    fn test_line_count_preserved() {
        let input = "a@b.com\n\nsecret: x\n1234123412341234\n";
        assert_eq!(redact(input).text.lines().count(), input.lines().count());
    }
}
