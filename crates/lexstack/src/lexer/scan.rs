//! The scanning engine
//!
//! One [`Scanner`] value is the whole mutable state of a `tokenize` call:
//! cursor position, mode stack, and output accumulators. The compiled
//! catalog is only ever read, so concurrent calls on one lexer are safe.

use compact_str::CompactString;
use hashbrown::HashMap;
use smallvec::{SmallVec, smallvec};

use crate::catalog::analyze::{CompiledCatalog, Disposition, ModeTable};
use crate::error::{LexError, LexErrorKind};
use crate::kind::TokenKind;
use crate::lexer::token::{LexResult, Token};
use crate::position::{count_line_terminators, find_last_line_terminator_index};

pub(crate) struct Scanner<'c, 'i, K: TokenKind> {
    catalog: &'c CompiledCatalog<K>,
    input: &'i str,
    offset: usize,
    line: u32,
    column: u32,
    mode_stack: SmallVec<[usize; 4]>,
    tokens: Vec<Token<K>>,
    groups: HashMap<CompactString, Vec<Token<K>>, ahash::RandomState>,
    errors: Vec<LexError>,
}

impl<'c, 'i, K: TokenKind> Scanner<'c, 'i, K> {
    pub(crate) fn new(
        catalog: &'c CompiledCatalog<K>,
        input: &'i str,
        initial_mode: usize,
    ) -> Self {
        let mut groups = HashMap::with_hasher(ahash::RandomState::new());
        for name in &catalog.group_names {
            groups.insert(name.clone(), Vec::new());
        }
        Self {
            catalog,
            input,
            offset: 0,
            line: 1,
            column: 1,
            mode_stack: smallvec![initial_mode],
            tokens: Vec::new(),
            groups,
            errors: Vec::new(),
        }
    }

    /// The stack is seeded with the initial mode and a refused pop leaves it
    /// intact, so it is never empty while scanning.
    fn current_mode(&self) -> &'c ModeTable<K> {
        let idx = self
            .mode_stack
            .last()
            .copied()
            .unwrap_or(self.catalog.default_mode);
        &self.catalog.modes[idx]
    }

    pub(crate) fn run(mut self) -> LexResult<K> {
        while self.offset < self.input.len() {
            match self.next_match() {
                Some((idx, len)) => self.consume(idx, len),
                None => self.recover(),
            }
        }
        LexResult {
            tokens: self.tokens,
            groups: self.groups,
            errors: self.errors,
        }
    }

    /// The winning pattern at the current position: first match in
    /// declaration order, upgraded to its longer alternative iff that one
    /// matches strictly longer. Returns the pattern index and match length.
    fn next_match(&self) -> Option<(usize, usize)> {
        let rest = &self.input[self.offset..];
        let mode = self.current_mode();
        for (i, pattern) in mode.patterns.iter().enumerate() {
            if let Some(m) = pattern.find(rest) {
                let mut winner = i;
                let mut len = m.end();
                if let Some(alt) = mode.longer_alt[i]
                    && let Some(alt_match) = mode.patterns[alt].find(rest)
                    && alt_match.end() > len
                {
                    winner = alt;
                    len = alt_match.end();
                }
                return Some((winner, len));
            }
        }
        None
    }

    fn consume(&mut self, i: usize, len: usize) {
        let image = &self.input[self.offset..self.offset + len];
        let start_offset = self.offset;
        let start_line = self.line;
        let start_column = self.column;

        let mode = self.current_mode();
        let can_line_terminate = mode.can_line_terminate[i];
        let disposition = mode.disposition[i].clone();
        let owner = mode.owner[i];
        let push_mode = mode.push_mode[i];
        let pop_mode = mode.pop_mode[i];

        self.offset += len;
        // naive advance, re-based below when the image spans lines
        self.column += len as u32;

        let mut end_line = Some(start_line);
        let mut end_column = Some(start_column + len as u32 - 1);

        if can_line_terminate {
            let terminators = count_line_terminators(image);
            if terminators != 0 {
                self.line += terminators;
                let last_lt = find_last_line_terminator_index(image).unwrap_or(0);
                self.column = (len - last_lt) as u32;

                let last_char_is_lt = last_lt == len - 1;
                if terminators == 1 && last_char_is_lt {
                    // a single trailing terminator affects only the
                    // following tokens
                    end_line = None;
                    end_column = None;
                } else {
                    end_line = Some(self.line - u32::from(last_char_is_lt));
                    end_column = Some(self.column - 1 + u32::from(last_char_is_lt));
                }
            }
        }

        match disposition {
            Disposition::Skipped => {}
            Disposition::Default => self.tokens.push(Token {
                kind: owner,
                image: image.into(),
                start_offset,
                start_line,
                start_column,
                end_line,
                end_column,
            }),
            Disposition::Group(name) => {
                let token = Token {
                    kind: owner,
                    image: image.into(),
                    start_offset,
                    start_line,
                    start_column,
                    end_line,
                    end_column,
                };
                if let Some(bucket) = self.groups.get_mut(name.as_str()) {
                    bucket.push(token);
                }
            }
        }

        // pop before push: a single token can swap the whole mode
        if pop_mode {
            if self.mode_stack.len() > 1 {
                self.mode_stack.pop();
            } else {
                self.errors.push(LexError {
                    offset: start_offset,
                    line: start_line,
                    column: start_column,
                    length: len,
                    kind: LexErrorKind::EmptyModeStack {
                        image: image.into(),
                    },
                });
            }
        }
        if let Some(target) = push_mode {
            self.mode_stack.push(target);
        }
    }

    /// Skip-and-resync recovery: drop one character at a time until some
    /// pattern of the current mode matches again or the input runs out,
    /// then record a single error covering the whole skipped span.
    fn recover(&mut self) {
        let error_offset = self.offset;
        let error_line = self.line;
        let error_column = self.column;

        while self.offset < self.input.len() {
            self.skip_one_char();
            if self.offset >= self.input.len() {
                break;
            }
            let rest = &self.input[self.offset..];
            if self
                .current_mode()
                .patterns
                .iter()
                .any(|pattern| pattern.is_match(rest))
            {
                break;
            }
        }

        let text = &self.input[error_offset..self.offset];
        self.errors.push(LexError {
            offset: error_offset,
            line: error_line,
            column: error_column,
            length: self.offset - error_offset,
            kind: LexErrorKind::UnexpectedCharacters { text: text.into() },
        });
    }

    fn skip_one_char(&mut self) {
        let bytes = self.input.as_bytes();
        match bytes[self.offset] {
            b'\n' => {
                self.line += 1;
                self.column = 1;
                self.offset += 1;
            }
            b'\r' => {
                if bytes.get(self.offset + 1) == Some(&b'\n') {
                    // the \n of the pair does the line increment
                    self.column += 1;
                } else {
                    self.line += 1;
                    self.column = 1;
                }
                self.offset += 1;
            }
            _ => {
                let width = self.input[self.offset..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.column += width as u32;
                self.offset += width;
            }
        }
    }
}
