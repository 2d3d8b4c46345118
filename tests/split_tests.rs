use syncthru::split_command_line;

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_split_plain_words() {
    assert_eq!(split_command_line("export"), words(&["export"]));
    assert_eq!(
        split_command_line("syncthru-export --host printer.local"),
        words(&["syncthru-export", "--host", "printer.local"])
    );
}

#[test]
fn test_split_collapses_whitespace() {
    assert_eq!(
        split_command_line("  export \t --host   printer  "),
        words(&["export", "--host", "printer"])
    );
    assert_eq!(split_command_line(""), Vec::<String>::new());
    assert_eq!(split_command_line("   "), Vec::<String>::new());
}

#[test]
fn test_split_backslash_escapes() {
    assert_eq!(
        split_command_line(r"cat snap\ shot.json"),
        words(&["cat", "snap shot.json"])
    );
    assert_eq!(split_command_line(r"a\\b"), words(&[r"a\b"]));
    assert_eq!(split_command_line(r"a\xb"), words(&["axb"]));
    assert_eq!(split_command_line(r"trailing\"), words(&[r"trailing\"]));
}

#[test]
fn test_split_single_quotes() {
    assert_eq!(
        split_command_line("export '--name=Front Desk'"),
        words(&["export", "--name=Front Desk"])
    );
    assert_eq!(split_command_line("'$VAR'"), words(&["$VAR"]));
    assert_eq!(split_command_line(r"'a\b'"), words(&[r"a\b"]));
    assert_eq!(split_command_line("''"), words(&[""]));
}

#[test]
fn test_split_double_quotes() {
    assert_eq!(
        split_command_line("export \"Front Desk\""),
        words(&["export", "Front Desk"])
    );
    assert_eq!(split_command_line(r#""a\"b""#), words(&[r#"a"b"#]));
    assert_eq!(split_command_line(r#""a\\b""#), words(&[r"a\b"]));
    assert_eq!(split_command_line(r#""a\xb""#), words(&[r"a\xb"]));
    assert_eq!(split_command_line("\"\""), words(&[""]));
}

#[test]
fn test_split_adjacent_spans_join() {
    assert_eq!(
        split_command_line("before'mid'after"),
        words(&["beforemidafter"])
    );
    assert_eq!(
        split_command_line("--name=\"Front Desk\""),
        words(&["--name=Front Desk"])
    );
}

#[test]
fn test_split_unclosed_quotes_run_to_end() {
    assert_eq!(split_command_line("'open ended"), words(&["open ended"]));
    assert_eq!(split_command_line("\"open ended"), words(&["open ended"]));
}

#[test]
fn test_split_mixed_quoting() {
    assert_eq!(
        split_command_line(r#"run 'a b' "c d" e\ f"#),
        words(&["run", "a b", "c d", "e f"])
    );
}
