use std::io::BufRead;

use crate::config::DEFAULT_QUERY;

/// Pick the search query.
///
/// Precedence: positional argument, then `-s/--search`, then one line of
/// `stdin`. Only the stdin line is trimmed; an explicit query is used as given.
/// A blank result falls back to [`DEFAULT_QUERY`]. A failed stdin read is
/// logged and treated as an empty line.
pub fn resolve_query<R: BufRead>(
    positional: Option<String>,
    flag: Option<String>,
    stdin: R,
) -> String {
    let query = match positional.or(flag) {
        Some(query) => query,
        None => read_line(stdin).trim().to_string(),
    };

    if query.trim().is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        query
    }
}

fn read_line<R: BufRead>(mut stdin: R) -> String {
    let mut line = String::new();
    if let Err(e) = stdin.read_line(&mut line) {
        tracing::warn!(error = %e, "Error reading stdin");
    }
    line.trim_end_matches(['\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use super::*;

    struct BrokenStdin;

    impl Read for BrokenStdin {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }
    }

    fn no_stdin() -> Cursor<&'static [u8]> {
        Cursor::new(&b""[..])
    }

    #[test]
    fn positional_wins() {
        let query = resolve_query(Some("rust".into()), Some("go".into()), Cursor::new(&b"zig\n"[..]));
        assert_eq!(query, "rust");
    }

    #[test]
    fn flag_beats_stdin() {
        let query = resolve_query(None, Some("go".into()), Cursor::new(&b"zig\n"[..]));
        assert_eq!(query, "go");
    }

    #[test]
    fn stdin_reads_only_first_line() {
        let query = resolve_query(None, None, Cursor::new(&b"neovim lua config\r\nsecond\n"[..]));
        assert_eq!(query, "neovim lua config");
    }

    #[test]
    fn explicit_query_is_not_trimmed() {
        assert_eq!(resolve_query(Some(" rust ".into()), None, no_stdin()), " rust ");
        assert_eq!(resolve_query(None, Some("go  ".into()), no_stdin()), "go  ");
    }

    #[test]
    fn stdin_line_is_trimmed() {
        let query = resolve_query(None, None, Cursor::new(&b"  zig build \n"[..]));
        assert_eq!(query, "zig build");
    }

    #[test]
    fn empty_input_uses_default() {
        assert_eq!(resolve_query(None, None, no_stdin()), DEFAULT_QUERY);
        assert_eq!(resolve_query(Some("  ".into()), None, no_stdin()), DEFAULT_QUERY);
    }

    #[test]
    fn stdin_error_is_not_fatal() {
        let query = resolve_query(None, None, io::BufReader::new(BrokenStdin));
        assert_eq!(query, DEFAULT_QUERY);
    }
}
