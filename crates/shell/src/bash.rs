use super::{escape_bash_like, Shell};

pub struct BashShell;

impl Shell for BashShell {
    fn export(&self, key: &str, value: &str) -> String {
        format!("export {key}={}", self.escape(value))
    }

    fn unset(&self, key: &str) -> String {
        format!("unset {key}")
    }

    fn escape(&self, s: &str) -> String {
        escape_bash_like(s)
    }
}
