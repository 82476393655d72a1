use super::Shell;

pub struct PwshShell;

impl Shell for PwshShell {
    fn export(&self, key: &str, value: &str) -> String {
        format!(r#"$env:{} = {}"#, key, self.escape(value))
    }

    fn unset(&self, key: &str) -> String {
        format!(r#"Remove-Item -Path Env:\{key} -ErrorAction SilentlyContinue"#)
    }

    fn escape(&self, s: &str) -> String {
        let mut result = String::with_capacity(s.len() + 10);
        result.push('"');
        for c in s.chars() {
            match c {
                '"' => result.push_str("`\""),
                '`' => result.push_str("``"),
                '$' => result.push_str("`$"),
                _ => result.push(c),
            }
        }
        result.push('"');
        result
    }
}
