use super::Shell;

pub struct FishShell;

impl Shell for FishShell {
    fn export(&self, key: &str, value: &str) -> String {
        format!("set -gx {key} {}", self.escape(value))
    }

    fn unset(&self, key: &str) -> String {
        format!("set -e {key}")
    }

    fn escape(&self, s: &str) -> String {
        if s.is_empty() {
            return "''".to_string();
        }

        let needs_quotes = s.chars().any(|c| {
            matches!(
                c,
                ' ' | '\t'
                    | '\n'
                    | '\r'
                    | '$'
                    | '&'
                    | '|'
                    | '<'
                    | '>'
                    | '('
                    | ')'
                    | '{'
                    | '}'
                    | '['
                    | ']'
                    | '*'
                    | '?'
                    | '~'
                    | ';'
                    | '"'
                    | '\''
                    | '\\'
            )
        });

        if !needs_quotes {
            return s.to_string();
        }

        // Inside single quotes fish only interprets \' and \\
        let mut result = String::with_capacity(s.len() + 2);
        result.push('\'');
        for c in s.chars() {
            match c {
                '\'' => result.push_str("\\'"),
                '\\' => result.push_str("\\\\"),
                _ => result.push(c),
            }
        }
        result.push('\'');
        result
    }
}
