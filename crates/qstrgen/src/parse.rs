use crate::charname::escape_ident;

use std::{
    collections::{HashMap, HashSet},
    io,
    path::Path,
};

// ---------------------------------------------------------------------------
// Qstr
// ---------------------------------------------------------------------------

/// One declared qstr, in first-seen order.
///
/// The deduplication key is `ident`, not `qstr`: two distinct raw strings
/// that sanitize to the same identifier collide, and the second one is
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qstr {
    pub order: usize,
    pub ident: String,
    pub qstr: String,
}

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty preprocessor output - no QCFG directive found in any input")]
    EmptyConfig,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Configuration assignments collected from `QCFG(key, value)` lines.
pub type ConfigMap = HashMap<String, String>;

/// Everything extracted from the input corpus: the configuration map and
/// the declared qstrs in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub cfg: ConfigMap,
    pub qstrs: Vec<Qstr>,
}

/// Scans directive files for `QCFG(key, value)` and `Q(content)` lines.
///
/// Inputs are fed in caller order, one source at a time; later `QCFG`
/// values overwrite earlier ones, while `Q` declarations are first-seen
/// wins across the whole corpus. Any line that matches neither grammar is
/// preprocessor noise and is skipped without complaint.
#[derive(Debug, Default)]
pub struct Parser {
    cfg: ConfigMap,
    qstrs: Vec<Qstr>,
    seen: HashSet<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and scans one input file.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let data = std::fs::read_to_string(path.as_ref())?;
        self.parse_source(&data);
        Ok(())
    }

    /// Scans one source's lines.
    pub fn parse_source(&mut self, src: &str) {
        for line in src.lines() {
            self.parse_line(line.trim());
        }
    }

    fn parse_line(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("QCFG(") {
            if let Some((key, value)) = split_config(rest) {
                self.cfg.insert(key.to_string(), value.to_string());
                return;
            }
        }

        // A declaration is the whole line: `Q(` up front, `)` at the end,
        // with the content free to contain parentheses in between.
        if let Some(qstr) = line.strip_prefix("Q(").and_then(|r| r.strip_suffix(')')) {
            let ident = escape_ident(qstr);
            if self.seen.insert(ident.clone()) {
                self.qstrs.push(Qstr {
                    order: self.qstrs.len(),
                    ident,
                    qstr: qstr.to_string(),
                });
            }
        }
    }

    /// Finalizes the scan. An empty configuration map means the upstream
    /// preprocessor produced nothing usable, which is fatal.
    pub fn finish(self) -> Result<ParsedInput, ParseError> {
        if self.cfg.is_empty() {
            return Err(ParseError::EmptyConfig);
        }
        Ok(ParsedInput {
            cfg: self.cfg,
            qstrs: self.qstrs,
        })
    }
}

/// Splits the body of a `QCFG(...)` line at the last `", "` before the
/// last `)`. A value wrapped in one pair of parentheses is unwrapped, so
/// `QCFG(K, (1))` stores `1`.
fn split_config(rest: &str) -> Option<(&str, &str)> {
    let close = rest.rfind(')')?;
    let inner = &rest[..close];
    let sep = inner.rfind(", ")?;
    let key = &inner[..sep];
    let mut value = &inner[sep + 2..];
    if key.is_empty() || value.is_empty() {
        return None;
    }
    if value.starts_with('(') && value.ends_with(')') {
        value = &value[1..value.len() - 1];
    }
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    fn parse(sources: &[&str]) -> Result<ParsedInput, ParseError> {
        let mut parser = Parser::new();
        for src in sources {
            parser.parse_source(src);
        }
        parser.finish()
    }

    fn idents(parsed: &ParsedInput) -> Vec<&str> {
        parsed.qstrs.iter().map(|q| q.ident.as_str()).collect()
    }

    #[test]
    fn config_and_declarations() {
        let parsed = parse(&["QCFG(BYTES_IN_LEN, 1)\nQCFG(BYTES_IN_HASH, 2)\nQ(hello)\n"])
            .unwrap();
        assert_eq!(parsed.cfg["BYTES_IN_LEN"], "1");
        assert_eq!(parsed.cfg["BYTES_IN_HASH"], "2");
        assert_eq!(parsed.qstrs.len(), 1);
        assert_eq!(parsed.qstrs[0].order, 0);
        assert_eq!(parsed.qstrs[0].qstr, "hello");
        assert_eq!(parsed.qstrs[0].ident, "hello");
    }

    #[test]
    fn config_value_parens_stripped() {
        let parsed = parse(&["QCFG(BYTES_IN_LEN, (1))\n"]).unwrap();
        assert_eq!(parsed.cfg["BYTES_IN_LEN"], "1");
    }

    #[test]
    fn later_config_wins() {
        let parsed = parse(&["QCFG(BYTES_IN_LEN, 1)\n", "QCFG(BYTES_IN_LEN, 2)\n"]).unwrap();
        assert_eq!(parsed.cfg["BYTES_IN_LEN"], "2");
    }

    #[test]
    fn unrecognized_lines_skipped() {
        let parsed = parse(&[
            "QCFG(BYTES_IN_LEN, 1)\n\
             # pragma something\n\
             QCFG(missing paren\n\
             Q(unterminated\n\
             QXYZ(other)\n\
             int main(void);\n\
             Q(ok)\n",
        ])
        .unwrap();
        assert_eq!(idents(&parsed), ["ok"]);
        assert_eq!(parsed.cfg.len(), 1);
    }

    #[test]
    fn declarations_deduplicated_first_seen_wins() {
        let parsed = parse(&[
            "QCFG(BYTES_IN_LEN, 1)\nQ(hello)\nQ(world)\nQ(hello)\n",
            "Q(world)\nQ(again)\n",
        ])
        .unwrap();
        assert_eq!(idents(&parsed), ["hello", "world", "again"]);
        let orders: Vec<_> = parsed.qstrs.iter().map(|q| q.order).collect();
        assert_eq!(orders, [0, 1, 2]);
    }

    #[test]
    fn dedup_is_by_sanitized_identifier() {
        // "a.b" and "a_dot_b" sanitize to the same identifier, so the
        // second raw string is dropped.
        let parsed = parse(&["QCFG(BYTES_IN_LEN, 1)\nQ(a.b)\nQ(a_dot_b)\n"]).unwrap();
        assert_eq!(idents(&parsed), ["a_dot_b"]);
        assert_eq!(parsed.qstrs[0].qstr, "a.b");
    }

    #[test]
    fn content_may_contain_parentheses() {
        let parsed = parse(&["QCFG(BYTES_IN_LEN, 1)\nQ(foo(bar))\n"]).unwrap();
        assert_eq!(parsed.qstrs[0].qstr, "foo(bar)");
    }

    #[test]
    fn lines_are_trimmed() {
        let parsed = parse(&["  QCFG(BYTES_IN_LEN, 1)  \n\t Q(hi) \n"]).unwrap();
        assert_eq!(idents(&parsed), ["hi"]);
    }

    #[test]
    fn empty_config_is_fatal() {
        assert_eq!(parse(&["Q(hello)\n"]), Err(ParseError::EmptyConfig));
        assert_eq!(parse(&[]), Err(ParseError::EmptyConfig));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "QCFG(BYTES_IN_LEN, 1)\nQ(ondisk)\n").unwrap();

        let mut parser = Parser::new();
        parser.parse_file(temp.path()).unwrap();
        let parsed = parser.finish().unwrap();
        assert_eq!(idents(&parsed), ["ondisk"]);
    }

    #[test]
    fn parse_file_missing_path_is_io_error() {
        let mut parser = Parser::new();
        assert!(parser.parse_file("/nonexistent/qstrdefs.h").is_err());
    }
}
