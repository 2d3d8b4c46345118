pub mod monitor;
pub mod sensor;
pub mod source;
pub mod status;

use std::collections::BTreeSet;

use crate::status::StatusSnapshot;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Domain key under which printers are registered.
pub const DOMAIN: &str = "syncthru";

/// Device-registry identity for a printer, keyed by its serial number
///
/// Returns `None` while the snapshot carries no serial number; callers
/// treat that as "no identity yet", not as an error.
///
/// # Examples
///
/// ```
/// use syncthru::{DOMAIN, device_identifiers};
/// use syncthru::status::StatusSnapshot;
///
/// let snapshot = StatusSnapshot::from_json(r#"{"serial_number": "ZDE1234"}"#).unwrap();
/// let ids = device_identifiers(&snapshot).unwrap();
/// assert!(ids.contains(&(DOMAIN.to_string(), "ZDE1234".to_string())));
///
/// let empty = StatusSnapshot::from_json("{}").unwrap();
/// assert_eq!(device_identifiers(&empty), None);
/// ```
pub fn device_identifiers(snapshot: &StatusSnapshot) -> Option<BTreeSet<(String, String)>> {
    let serial = snapshot.serial_number()?;
    Some(BTreeSet::from([(DOMAIN.to_string(), serial.to_string())]))
}

/// Split a command line into words, honoring shell-style quoting
///
/// Handles `\<char>` escapes, `'single'` and `"double"` quoted spans;
/// adjacent quoted and unquoted spans join into one word.
///
/// # Examples
///
/// ```
/// use syncthru::split_command_line;
///
/// assert_eq!(
///     split_command_line("syncthru-export --host printer.local"),
///     vec!["syncthru-export", "--host", "printer.local"]
/// );
///
/// // Quoted arguments keep their spaces
/// assert_eq!(
///     split_command_line("export '--name=Front Desk'"),
///     vec!["export", "--name=Front Desk"]
/// );
///
/// // Escaped space
/// assert_eq!(
///     split_command_line(r"cat snap\ shot.json"),
///     vec!["cat", "snap shot.json"]
/// );
/// ```
pub fn split_command_line(s: &str) -> Vec<String> {
    type CharIter<'a> = std::iter::Peekable<std::str::Chars<'a>>;

    fn backslash(chars: &mut CharIter, word: &mut String) {
        match chars.next() {
            Some(next_ch) => word.push(next_ch),
            None => word.push('\\'),
        }
    }

    fn double_backslash(chars: &mut CharIter, word: &mut String) {
        if let Some(&next_ch) = chars.peek()
            && "\"\\$`".contains(next_ch)
        {
            word.push(chars.next().unwrap());
        } else {
            word.push('\\');
        }
    }

    fn single_str(chars: &mut CharIter, word: &mut String) {
        #[allow(clippy::while_let_on_iterator)]
        while let Some(ch) = chars.next() {
            if ch == '\'' {
                break;
            }
            word.push(ch);
        }
    }

    fn double_str(chars: &mut CharIter, word: &mut String) {
        while let Some(ch) = chars.next() {
            if ch == '"' {
                break;
            }
            if ch == '\\' {
                double_backslash(chars, word);
            } else {
                word.push(ch);
            }
        }
    }

    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '\\' => {
                backslash(&mut chars, &mut word);
                in_word = true;
            }
            '\'' => {
                single_str(&mut chars, &mut word);
                in_word = true;
            }
            '"' => {
                double_str(&mut chars, &mut word);
                in_word = true;
            }
            _ => {
                word.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    words
}
