//! Text normalisation helpers for comparing generated files.

/// Returns the trimmed lines of `script` that are neither blank nor comments.
#[must_use]
pub fn script_lines(script: &str) -> Vec<&str> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Returns the comment lines of `script` with the leading `#` and one space removed.
#[must_use]
pub fn comment_lines(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter_map(|line| line.trim().strip_prefix('#'))
        .map(|comment| comment.strip_prefix(' ').unwrap_or(comment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{comment_lines, script_lines};

    #[test]
    fn script_lines_skip_comments_and_blanks() {
        let script = "# header\n\nset a 1\n  # note\nset b 2\n";
        assert_eq!(script_lines(script), ["set a 1", "set b 2"]);
    }

    #[test]
    fn comment_lines_strip_markers() {
        assert_eq!(comment_lines("# one\nset a 1\n#two\n"), ["one", "two"]);
    }
}
