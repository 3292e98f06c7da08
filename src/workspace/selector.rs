use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{InitError, Result};

pub fn render_menu(candidates: &[PathBuf]) -> String {
    let mut menu = String::from("Choose destination:\n");
    for (idx, candidate) in candidates.iter().enumerate() {
        menu.push_str(&format!("[{idx}] {}\n", candidate.display()));
    }
    menu
}

/// List `candidates`, read one line from `input` and return the chosen entry.
///
/// There is a single attempt: anything that is not an index into
/// `candidates` fails instead of prompting again.
pub fn select(
    candidates: &[PathBuf],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf> {
    if candidates.is_empty() {
        return Err(InitError::user_input(
            "no valid destinations found under the workspace root",
        ));
    }

    write!(output, "{}> ", render_menu(candidates))
        .and_then(|_| output.flush())
        .map_err(|e| InitError::user_input(format!("writing prompt: {e}")))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| InitError::user_input(format!("reading selection: {e}")))?;
    if read == 0 {
        return Err(InitError::user_input("no selection entered"));
    }

    let raw = line.trim();
    let choice: usize = raw
        .parse()
        .map_err(|_| InitError::user_input(format!("invalid choice `{raw}`: not a number")))?;

    candidates.get(choice).cloned().ok_or_else(|| {
        InitError::user_input(format!(
            "invalid choice {choice}: expected 0..={}",
            candidates.len() - 1
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn abc() -> Vec<PathBuf> {
        ["a", "b", "c"].iter().map(PathBuf::from).collect()
    }

    fn run(candidates: &[PathBuf], input: &str) -> (Result<PathBuf>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = select(candidates, &mut reader, &mut out);
        (result, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn menu_lists_zero_based_indices() {
        insta::assert_snapshot!(render_menu(&abc()), @r"
        Choose destination:
        [0] a
        [1] b
        [2] c
        ");
    }

    #[test]
    fn valid_index_returns_candidate() {
        let (result, shown) = run(&abc(), "1\n");
        assert_eq!(result.expect("choice"), PathBuf::from("b"));
        assert!(shown.ends_with("[2] c\n> "));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let (result, _) = run(&abc(), "  2 \r\n");
        assert_eq!(result.expect("choice"), PathBuf::from("c"));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let (result, _) = run(&abc(), "5\n");
        let err = result.expect_err("must fail");
        assert!(matches!(err, InitError::UserInput { .. }));
        assert_eq!(err.to_string(), "invalid choice 5: expected 0..=2");

        let (result, _) = run(&abc(), "3\n");
        assert!(matches!(result, Err(InitError::UserInput { .. })));
    }

    #[test]
    fn non_numeric_and_negative_input_are_rejected() {
        for input in ["x\n", "-1\n", "\n", "1 2\n"] {
            let (result, _) = run(&abc(), input);
            assert!(
                matches!(result, Err(InitError::UserInput { .. })),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn end_of_input_is_rejected() {
        let (result, _) = run(&abc(), "");
        let err = result.expect_err("must fail");
        assert_eq!(err.to_string(), "no selection entered");
    }

    #[test]
    fn empty_candidates_fail_without_prompting() {
        let (result, shown) = run(&[], "0\n");
        let err = result.expect_err("must fail");
        assert!(matches!(err, InitError::UserInput { .. }));
        assert!(err.to_string().contains("no valid destinations"));
        assert!(shown.is_empty());
    }
}
