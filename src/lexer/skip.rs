//! Whitespace skipping for the lexer.
//!
//! Only spaces and tabs are skipped here; `\n` is handled separately by
//! the main scan loop since it also advances the line counter, and the
//! dialect has no comment syntax (`/` is an ordinary operator character,
//! so `//` lexes as one `OPERATOR` token, not a comment opener).

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Skips consecutive spaces and tabs.
    pub(super) fn skip_spaces_and_tabs(&mut self) {
        while matches!(self.current_char(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }
}
