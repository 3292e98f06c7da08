/// Split a configured command line such as `"code -n"` into `("code", ["-n"])`.
///
/// Returns `None` when the line holds nothing but whitespace.
pub fn split_command_line(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace();
    let program = parts.next()?.to_string();
    let rest = parts.map(str::to_string).collect();
    Some((program, rest))
}

pub fn quote_for_display(input: &str) -> String {
    if input.is_empty() {
        return "\"\"".to_string();
    }

    if input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '='))
    {
        return input.to_string();
    }

    format!("\"{}\"", input.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_leading_arguments() {
        let (program, args) = split_command_line("  go mod   init ").expect("command");
        assert_eq!(program, "go");
        assert_eq!(args, vec!["mod".to_string(), "init".to_string()]);
    }

    #[test]
    fn split_rejects_blank_lines() {
        assert!(split_command_line("").is_none());
        assert!(split_command_line(" \t ").is_none());
    }

    #[test]
    fn quoting_only_wraps_unsafe_words() {
        assert_eq!(quote_for_display("initial"), "initial");
        assert_eq!(quote_for_display("initial commit"), "\"initial commit\"");
        assert_eq!(quote_for_display(""), "\"\"");
        assert_eq!(quote_for_display("a\"b"), "\"a\\\"b\"");
    }
}
