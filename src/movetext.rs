// This file is part of the plyboard library.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Split the movetext of one game into move tokens.
//!
//! Headers are expected to be stripped already. Move numbers, comments,
//! variations, numeric annotation glyphs and `!`/`?` suffixes are skipped.
//!
//! # Examples
//!
//! ```
//! use plyboard::movetext::tokenize;
//!
//! let tokens = tokenize("1. e4 {best by test} e5 2. Nf3!? (2. f4 exf4) Nc6 $1 *")?;
//! let sans: Vec<&str> = tokens.iter().map(|t| t.san).collect();
//! assert_eq!(sans, ["e4", "e5", "Nf3", "Nc6", "*"]);
//! assert_eq!(tokens[2].number, Some(2));
//! # Ok::<_, plyboard::ParseError>(())
//! ```

use crate::errors::ParseError;

/// A move (or result) token in movetext.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SanToken<'a> {
    /// The move number written right before the token, if any.
    pub number: Option<u32>,
    /// The move in SAN, including any check suffix.
    pub san: &'a str,
}

fn is_token_end(ch: u8) -> bool {
    matches!(
        ch,
        b' ' | b'\t' | b'\n' | b'\r' | b'{' | b'}' | b'(' | b')' | b'!' | b'?' | b'$' | b';'
    )
}

struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn bytes(&self) -> &'a [u8] {
        &self.text.as_bytes()[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().first().copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_until(&mut self, needle: u8) -> Result<(), ParseError> {
        let offset = self
            .bytes()
            .iter()
            .position(|&ch| ch == needle)
            .ok_or(ParseError::Unterminated)?;
        self.pos += offset + 1;
        Ok(())
    }

    fn skip_line(&mut self) {
        match self.bytes().iter().position(|&ch| ch == b'\n') {
            Some(offset) => self.pos += offset + 1,
            None => self.pos = self.text.len(),
        }
    }

    fn skip_variation(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            let ch = self.peek().ok_or(ParseError::Unterminated)?;
            self.bump();
            match ch {
                b'(' => depth += 1,
                b')' => depth -= 1,
                b'{' => self.skip_until(b'}')?,
                b';' => self.skip_line(),
                _ => (),
            }
        }
        Ok(())
    }

    fn token(&mut self) -> &'a str {
        let start = self.pos;
        let len = self
            .bytes()
            .iter()
            .position(|&ch| is_token_end(ch))
            .unwrap_or(self.text.len() - start);
        self.pos += len;
        // Token ends are ASCII, so both ends are char boundaries.
        &self.text[start..start + len]
    }

    fn skip_glyphs(&mut self) {
        while let Some(b'!' | b'?') = self.peek() {
            self.bump();
        }
    }

    fn skip_nag(&mut self) {
        self.bump();
        while let Some(b'0'..=b'9') = self.peek() {
            self.bump();
        }
    }
}

/// Splits a move number like `12.` or `12...` off the front of a word.
fn split_move_number(word: &str) -> Result<(Option<u32>, &str), ParseError> {
    let digits = word.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !word[digits..].starts_with('.') {
        return Ok((None, word));
    }
    let number = btoi::btou(&word.as_bytes()[..digits]).map_err(|_| ParseError::InvalidToken)?;
    Ok((Some(number), word[digits..].trim_start_matches('.')))
}

/// Splits `movetext` into move and result tokens, in order.
///
/// # Errors
///
/// Returns [`ParseError::Unterminated`] if a `{` comment or `(` variation
/// is not closed, or [`ParseError::InvalidToken`] for a move number that
/// does not fit into `u32`.
pub fn tokenize(movetext: &str) -> Result<Vec<SanToken<'_>>, ParseError> {
    let mut tokenizer = Tokenizer {
        text: movetext,
        pos: 0,
    };
    let mut tokens = Vec::new();
    let mut number = None;
    let mut line_start = true;

    while let Some(ch) = tokenizer.peek() {
        let at_line_start = line_start;
        line_start = false;
        match ch {
            b'\n' => {
                tokenizer.bump();
                line_start = true;
            }
            b' ' | b'\t' | b'\r' => {
                tokenizer.bump();
                line_start = at_line_start;
            }
            b'%' if at_line_start => {
                tokenizer.skip_line();
                line_start = true;
            }
            b'{' => {
                tokenizer.bump();
                tokenizer.skip_until(b'}')?;
            }
            b';' => {
                tokenizer.skip_line();
                line_start = true;
            }
            b'(' => {
                tokenizer.bump();
                tokenizer.skip_variation()?;
            }
            b')' | b'}' => tokenizer.bump(),
            b'!' | b'?' => tokenizer.skip_glyphs(),
            b'$' => tokenizer.skip_nag(),
            _ => {
                let (word_number, san) = split_move_number(tokenizer.token())?;
                if word_number.is_some() {
                    number = word_number;
                }
                if !san.is_empty() {
                    tokens.push(SanToken {
                        number: number.take(),
                        san,
                    });
                }
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sans(movetext: &str) -> Vec<&str> {
        tokenize(movetext)
            .expect("valid movetext")
            .into_iter()
            .map(|t| t.san)
            .collect()
    }

    #[test]
    fn test_plain() {
        assert_eq!(sans("1. e4 e5 2. Nf3 Nc6 1-0"), ["e4", "e5", "Nf3", "Nc6", "1-0"]);
        assert_eq!(sans("1.e4 e5 2.Nf3"), ["e4", "e5", "Nf3"]);
        assert_eq!(sans(""), Vec::<&str>::new());
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("12. Qxf7+ 12... Kd8 13. O-O").expect("valid movetext");
        assert_eq!(tokens[0].number, Some(12));
        assert_eq!(tokens[0].san, "Qxf7+");
        assert_eq!(tokens[1].number, Some(12));
        assert_eq!(tokens[2].number, Some(13));
        assert_eq!(tokens[2].san, "O-O");

        let tokens = tokenize("1. e4 e5").expect("valid movetext");
        assert_eq!(tokens[1].number, None);

        assert_eq!(
            tokenize("99999999999. e4"),
            Err(ParseError::InvalidToken)
        );
    }

    #[test]
    fn test_results_are_not_numbers() {
        assert_eq!(sans("1. f3 e5 2. g4 Qh4# 0-1"), ["f3", "e5", "g4", "Qh4#", "0-1"]);
        assert_eq!(sans("1/2-1/2"), ["1/2-1/2"]);
    }

    #[test]
    fn test_comments_and_variations() {
        assert_eq!(
            sans("1. e4 {a (tricky) comment} e5 ; rest of line\n2. Nf3 (2. f4 {gambit} (2. d4) exf4) Nc6"),
            ["e4", "e5", "Nf3", "Nc6"]
        );
        assert_eq!(sans("1. e4 e5\n% escaped line\n2. d4"), ["e4", "e5", "d4"]);
    }

    #[test]
    fn test_annotations() {
        assert_eq!(sans("1. e4! e5?! 2. Qh5?? $4 Nc6 $146"), ["e4", "e5", "Qh5", "Nc6"]);
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(tokenize("1. e4 {open"), Err(ParseError::Unterminated));
        assert_eq!(tokenize("1. e4 (1. d4 d5"), Err(ParseError::Unterminated));
    }
}
