/// What the snake has to eat next
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Requirement {
    /// The next letter of the sequence
    Symbol(char),

    /// Every letter has been collected; only the bonus star remains
    Bonus,
}

/// Progress through a fixed, ordered list of symbols, followed by a single
/// bonus stage.
///
/// The cursor counts the symbols collected so far and never exceeds the
/// length of the list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SequenceTracker {
    symbols: Vec<char>,
    cursor: usize,
}

impl SequenceTracker {
    pub(crate) fn new<I: IntoIterator<Item = char>>(symbols: I) -> SequenceTracker {
        SequenceTracker {
            symbols: symbols.into_iter().collect(),
            cursor: 0,
        }
    }

    pub(crate) fn current(&self) -> Requirement {
        match self.symbols.get(self.cursor) {
            Some(&c) => Requirement::Symbol(c),
            None => Requirement::Bonus,
        }
    }

    /// Mark the current symbol as collected.  Does nothing in the bonus stage.
    pub(crate) fn advance(&mut self) {
        if self.cursor < self.symbols.len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.cursor == self.symbols.len()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn len(&self) -> usize {
        self.symbols.len()
    }

    /// The symbols collected so far, in order
    pub(crate) fn collected(&self) -> &[char] {
        &self.symbols[..self.cursor]
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }
}
