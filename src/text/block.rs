/// A literal block of text, broken into lines on explicit newlines only.
///
/// Every separator produces a new line, so empty lines (including a trailing
/// one after a final newline) keep their slot in the vertical stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBlock<'a> {
    text: &'a str,
}

impl<'a> TextBlock<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Iterates over the lines of the block. Always yields at least one line.
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            rest: Some(self.text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}

/// Returns `true` for every character that ends a line.
///
/// Each separator ends a line on its own, so `\r\n` leaves an empty line
/// between the two.
pub fn is_line_separator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Iterator returned by [`TextBlock::lines`].
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.char_indices().find(|&(_, ch)| is_line_separator(ch)) {
            Some((at, ch)) => {
                self.rest = Some(&rest[at + ch.len_utf8()..]);
                Some(&rest[..at])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
