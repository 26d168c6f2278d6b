//! Per-character editing of a digit block.
//!
//! The block is rendered as one box per input cell. This module holds the
//! cell contents and implements the keyboard behaviour of those boxes as
//! plain methods that take the focused cell index and return the index the
//! focus should move to, so the behaviour can be driven without any UI.

use common::model::digit::{CharType, DigitSegment};

use super::digit::{decode, encode, parse_format};

/// One box of a digit block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char_type: CharType,
    /// Index of the input segment (counting input segments only) the cell belongs to.
    pub segment: usize,
    pub value: Option<char>,
}

/// Cell-by-cell state of one digit block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitInput {
    segments: Vec<DigitSegment>,
    cells: Vec<Cell>,
}

impl DigitInput {
    /// Creates an empty block for `format`.
    pub fn new(format: &str) -> Self {
        let segments = parse_format(format);
        let mut cells = Vec::new();
        let inputs = segments.iter().filter_map(|s| match s {
            DigitSegment::Input { char_type, length } => Some((*char_type, *length)),
            DigitSegment::Separator { .. } => None,
        });
        for (segment, (char_type, length)) in inputs.enumerate() {
            cells.extend((0..length).map(|_| Cell {
                char_type,
                segment,
                value: None,
            }));
        }
        Self { segments, cells }
    }

    /// Creates a block for `format` pre-filled from a stored value.
    ///
    /// Characters that do not fit their cell's class are left out.
    pub fn from_value(format: &str, value: &str) -> Self {
        let mut block = Self::new(format);
        let parts = decode(value, &block.segments);
        let mut offset = 0;
        for (segment, part) in parts.iter().enumerate() {
            let width = block.cells.iter().filter(|c| c.segment == segment).count();
            for (i, ch) in part.chars().take(width).enumerate() {
                let cell = &mut block.cells[offset + i];
                cell.value = normalize_char(cell.char_type, ch);
            }
            offset += width;
        }
        block
    }

    pub fn segments(&self) -> &[DigitSegment] {
        &self.segments
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell holds a character.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.value.is_some())
    }

    /// Types `ch` into cell `index`.
    ///
    /// A character the cell does not accept is ignored and the focus stays.
    /// Otherwise the cell is overwritten (letters forced to upper case) and the
    /// focus advances to the next cell, staying on the last one.
    pub fn input(&mut self, index: usize, ch: char) -> usize {
        let Some(cell) = self.cells.get_mut(index) else {
            return self.clamp(index);
        };
        match normalize_char(cell.char_type, ch) {
            Some(ch) => {
                cell.value = Some(ch);
                self.clamp(index + 1)
            }
            None => index,
        }
    }

    /// Handles backspace in cell `index`.
    ///
    /// A filled cell is cleared and keeps the focus. An empty cell moves the
    /// focus to the previous cell and clears that one.
    pub fn backspace(&mut self, index: usize) -> usize {
        let index = self.clamp(index);
        if self.cells.is_empty() {
            return index;
        }
        if self.cells[index].value.take().is_some() {
            index
        } else if index > 0 {
            self.cells[index - 1].value = None;
            index - 1
        } else {
            index
        }
    }

    pub fn move_left(&self, index: usize) -> usize {
        self.clamp(index).saturating_sub(1)
    }

    pub fn move_right(&self, index: usize) -> usize {
        self.clamp(index + 1)
    }

    /// Distributes pasted text over the cells starting at `index`.
    ///
    /// Walks two indices: the source index advances on every character, the
    /// destination cell advances only when a character is written. A
    /// character the current cell rejects is dropped and the same cell is
    /// tried with the next one. Returns the cell that should take focus.
    pub fn paste(&mut self, index: usize, text: &str) -> usize {
        let source: Vec<char> = text.chars().collect();
        let mut src = 0;
        let mut dst = index;
        while src < source.len() && dst < self.cells.len() {
            if let Some(ch) = normalize_char(self.cells[dst].char_type, source[src]) {
                self.cells[dst].value = Some(ch);
                dst += 1;
            }
            src += 1;
        }
        self.clamp(dst)
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.value = None;
        }
    }

    /// One string per input segment, empty cells skipped.
    pub fn segment_values(&self) -> Vec<String> {
        let count = self.cells.last().map_or(0, |c| c.segment + 1);
        let mut values = vec![String::new(); count];
        for cell in &self.cells {
            if let Some(ch) = cell.value {
                values[cell.segment].push(ch);
            }
        }
        values
    }

    /// The stored value for the block, separators included.
    pub fn value(&self) -> String {
        encode(&self.segment_values(), &self.segments)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.cells.len().saturating_sub(1))
    }
}

fn normalize_char(char_type: CharType, ch: char) -> Option<char> {
    if !char_type.accepts(ch) {
        return None;
    }
    Some(match char_type {
        CharType::Letter => ch.to_ascii_uppercase(),
        _ => ch,
    })
}
