use crate::style::ColoredRune;

/// Accumulated styled runes, wrapped to a column budget as they arrive.
#[derive(Debug, Default, Clone)]
pub(crate) struct Content {
    runes: Vec<ColoredRune>,
    column: usize,
}

impl Content {
    /// Appends runes, inserting a synthetic newline whenever a line would
    /// exceed `columns`. The synthetic newline inherits the style of the
    /// rune that triggered the wrap, and that rune starts the new line
    /// uncounted, so in steady state one newline is inserted per
    /// `columns + 1` runes. `columns == 0` disables wrapping. The column
    /// counter persists across calls.
    pub(crate) fn append(&mut self, source: &[ColoredRune], columns: usize) {
        for &rune in source {
            if rune.symbol == '\n' {
                self.column = 0;
                self.runes.push(rune);
                continue;
            }
            self.column += 1;
            if columns > 0 && self.column > columns {
                self.runes.push(ColoredRune {
                    symbol: '\n',
                    style: rune.style,
                });
                self.column = 0;
            }
            self.runes.push(rune);
        }
    }

    pub(crate) fn runes(&self) -> &[ColoredRune] {
        &self.runes
    }
}
