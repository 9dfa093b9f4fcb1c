use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use streaming_iterator::StreamingIterator;

/// A lending iterator over the lines of a reader that reuses a single buffer,
/// and keeps track of the (one based) number of the current line.
///
/// Line endings (`\n` and `\r\n`) are removed. Reading stops at the end of
/// the input or at the first read error, the error is kept and can be
/// retrieved with [LineIterator::take_error].
pub struct LineIterator<T: Read> {
    reader: BufReader<T>,
    buffer: String,
    line_number: usize,
    error: Option<std::io::Error>,
    end: bool,
}

impl<T: Read> LineIterator<T> {
    pub fn new(reader: T) -> LineIterator<T> {
        LineIterator {
            reader: BufReader::new(reader),
            buffer: String::new(),
            line_number: 0,
            error: None,
            end: false,
        }
    }

    /// Returns the number of the line returned by the last call to `next`.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the read error that ended the iteration, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
}

impl<T: Read> StreamingIterator for LineIterator<T> {
    type Item = String;

    fn advance(&mut self) {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(n) if n > 0 => {
                self.line_number += 1;
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
            }
            Ok(_) => self.end = true,
            Err(error) => {
                self.error = Some(error);
                self.end = true;
            }
        }
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.end { None } else { Some(&self.buffer) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_lines(data: &str) -> Vec<(usize, String)> {
        let mut iterator = LineIterator::new(data.as_bytes());

        let mut lines = Vec::new();
        while let Some(line) = iterator.next() {
            let line = line.clone();
            lines.push((iterator.line_number(), line));
        }
        lines
    }

    #[test]
    fn test_line_iterator_numbers() {
        assert_eq!(
            collect_lines("a*b,b\n\n(a|b)*abb,abb"),
            vec![
                (1, "a*b,b".to_string()),
                (2, String::new()),
                (3, "(a|b)*abb,abb".to_string())
            ]
        );
    }

    #[test]
    fn test_line_iterator_empty() {
        assert!(collect_lines("").is_empty());
    }

    #[test]
    fn test_line_iterator_with_carriage_return() {
        assert_eq!(
            collect_lines("a?b,b\r\na?b,ab\r\n"),
            vec![(1, "a?b,b".to_string()), (2, "a?b,ab".to_string())]
        );
    }
}
