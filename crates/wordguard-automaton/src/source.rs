// Lazy line-oriented dictionary reader

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// Iterator over the words of a line-oriented dictionary source.
///
/// Yields one trimmed, non-blank word per line and reads the underlying
/// source one line at a time. A leading UTF-8 byte order mark is dropped.
pub struct LineSource<R> {
    lines: Lines<R>,
    first: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            first: true,
        }
    }
}

impl LineSource<BufReader<File>> {
    /// Open a dictionary file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let mut word = line.as_str();
            if self.first {
                self.first = false;
                word = word.strip_prefix('\u{FEFF}').unwrap_or(word);
            }
            let word = word.trim();
            if !word.is_empty() {
                return Some(Ok(word.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(src: &str) -> Vec<String> {
        LineSource::new(src.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn skips_blank_lines_and_trims() {
        assert_eq!(collect("a\n\n  b \n\t\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(collect("坏蛋\r\n敏感词\r\n"), vec!["坏蛋", "敏感词"]);
    }

    #[test]
    fn strips_leading_bom_only_once() {
        assert_eq!(collect("\u{FEFF}first\nsecond"), vec!["first", "second"]);
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("\n\n   \n").is_empty());
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let bytes: &[u8] = &[b'o', b'k', b'\n', 0xFF, 0xFE, b'\n'];
        let mut source = LineSource::new(bytes);
        assert_eq!(source.next().unwrap().unwrap(), "ok");
        assert!(source.next().unwrap().is_err());
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(LineSource::open("/nonexistent/wordguard/dict.txt").is_err());
    }
}
