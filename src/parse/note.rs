/// Parse a newline-delimited bullet note into subtask lines.
///
/// Each line is trimmed, a leading `- ` marker is stripped, and blank lines
/// are dropped. Order is preserved. A note containing only whitespace yields
/// an empty list, never empty strings.
pub fn parse_subtasks(note: &str) -> Vec<String> {
    note.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("- ").map(str::trim).unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Serialize subtask lines back into the bullet-note format the persistence
/// API stores: each line prefixed with `- `, joined by newlines.
pub fn serialize_subtasks(subtasks: &[String]) -> String {
    subtasks
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_bullets() {
        assert_eq!(
            parse_subtasks("- buy milk\n- call mom\n"),
            vec!["buy milk", "call mom"]
        );
    }

    #[test]
    fn test_parse_drops_blank_lines() {
        assert_eq!(parse_subtasks("- a\n\n   \n- b"), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_whitespace_only_note() {
        assert_eq!(parse_subtasks("  \n\n\t\n"), Vec::<String>::new());
    }

    #[test]
    fn test_parse_keeps_unmarked_lines() {
        // Lines without the bullet marker still count as subtasks.
        assert_eq!(parse_subtasks("first\n- second"), vec!["first", "second"]);
    }

    #[test]
    fn test_serialize_prefixes_each_line() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(serialize_subtasks(&lines), "- a\n- b");
    }

    #[test]
    fn test_round_trip_is_stable() {
        // parse(serialize(parse(note))) == parse(note)
        let note = "- buy milk\n- call mom\n\n-no space marker\n";
        let once = parse_subtasks(note);
        let again = parse_subtasks(&serialize_subtasks(&once));
        assert_eq!(once, again);
    }
}
