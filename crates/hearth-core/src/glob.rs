// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Case-sensitive glob matching for single path components.
//!
//! Supported syntax:
//! * `*` matches any run of characters, including none.
//! * `?` matches exactly one character.
//! * `[abc]`, `[a-z]` match one character from the set; `[!abc]` / `[^abc]`
//!   match one character *not* in the set. A `]` right after the opening
//!   bracket (or after the negation mark) is a literal member.
//! * `\x` matches `x` literally.
//!
//! An unterminated `[` and a trailing `\` are matched as literal characters.
//! The empty pattern matches every name.

/// One element of a set expression such as `[a-z_]`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SetItem {
    Char(char),
    Range(char, char),
}

impl SetItem {
    fn contains(&self, c: char) -> bool {
        match *self {
            SetItem::Char(item) => item == c,
            SetItem::Range(lo, hi) => lo <= c && c <= hi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
    Set { negated: bool, items: Vec<SetItem> },
}

impl Token {
    /// Returns `true` if this single-character token accepts `c`.
    fn accepts(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar => true,
            Token::Set { negated, items } => items.iter().any(|i| i.contains(c)) != *negated,
            Token::AnyRun => false,
        }
    }
}

/// A compiled glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    source: String,
    tokens: Vec<Token>,
}

impl GlobPattern {
    /// Compiles `pattern`. Compilation never fails; malformed constructs are
    /// treated as literals.
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            tokens: compile(pattern),
        }
    }

    /// Returns the pattern text this glob was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the pattern accepts every name (`""` or only `*`s).
    pub fn matches_everything(&self) -> bool {
        self.tokens.iter().all(|t| *t == Token::AnyRun)
    }

    /// Tests `name` against the pattern.
    pub fn matches(&self, name: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }

        let text: Vec<char> = name.chars().collect();
        let tokens = &self.tokens;
        let (mut ti, mut ci) = (0usize, 0usize);
        // Position of the last `*` and the text index it is currently absorbing up to.
        let mut star: Option<(usize, usize)> = None;

        while ci < text.len() {
            match tokens.get(ti) {
                Some(Token::AnyRun) => {
                    star = Some((ti, ci));
                    ti += 1;
                    continue;
                }
                Some(token) if token.accepts(text[ci]) => {
                    ti += 1;
                    ci += 1;
                    continue;
                }
                _ => {}
            }

            // Mismatch: let the last star swallow one more character and retry.
            match star {
                Some((star_ti, star_ci)) => {
                    ti = star_ti + 1;
                    ci = star_ci + 1;
                    star = Some((star_ti, star_ci + 1));
                }
                None => return false,
            }
        }

        tokens[ti..].iter().all(|t| *t == Token::AnyRun)
    }
}

/// Convenience wrapper: compiles `pattern` and tests `name` against it.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    GlobPattern::new(pattern).matches(name)
}

fn compile(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                // Consecutive stars are equivalent to one.
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
                i += 1;
            }
            '?' => {
                tokens.push(Token::AnyChar);
                i += 1;
            }
            '\\' if i + 1 < chars.len() => {
                tokens.push(Token::Literal(chars[i + 1]));
                i += 2;
            }
            '[' => match parse_set(&chars, i + 1) {
                Some((token, next)) => {
                    tokens.push(token);
                    i = next;
                }
                None => {
                    tokens.push(Token::Literal('['));
                    i += 1;
                }
            },
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    tokens
}

/// Parses a set body starting right after `[`. Returns the token and the index
/// just past the closing `]`, or `None` if the set is unterminated.
fn parse_set(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let mut i = start;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    let mut items = Vec::new();
    let first = i;
    loop {
        let c = *chars.get(i)?;
        if c == ']' && i != first {
            return Some((Token::Set { negated, items }, i + 1));
        }

        let c = if c == '\\' {
            i += 1;
            *chars.get(i)?
        } else {
            c
        };

        // `a-z`, but a `-` before the closing bracket is literal.
        match (chars.get(i + 1), chars.get(i + 2)) {
            (Some('-'), Some(&hi)) if hi != ']' => {
                items.push(SetItem::Range(c, hi));
                i += 3;
            }
            _ => {
                items.push(SetItem::Char(c));
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_matches_everything() {
        let glob = GlobPattern::new("");
        assert!(glob.matches_everything());
        assert!(glob.matches("anything.pak"));
        assert!(glob.matches(""));
    }

    #[test]
    fn star_matches_any_run() {
        assert!(glob_match("*", "pak0.pak"));
        assert!(glob_match("*.pak", "pak0.pak"));
        assert!(glob_match("pak*.pak", "pak.pak"));
        assert!(glob_match("*0*", "pak0.pak"));
        assert!(!glob_match("*.pak", "pak0.pk3"));
        assert!(glob_match("a**b", "ab"));
        assert!(GlobPattern::new("**").matches_everything());
    }

    #[test]
    fn star_backtracks() {
        assert!(glob_match("*.tar.gz", "backup.tar.tar.gz"));
        assert!(glob_match("*a*b", "xaxxaxb"));
        assert!(!glob_match("*a*b", "xaxxaxc"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        assert!(glob_match("pak?.pak", "pak1.pak"));
        assert!(!glob_match("pak?.pak", "pak.pak"));
        assert!(!glob_match("pak?.pak", "pak10.pak"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!glob_match("*.PAK", "pak0.pak"));
        assert!(glob_match("*.PAK", "PAK0.PAK"));
    }

    #[test]
    fn sets_and_ranges() {
        assert!(glob_match("save[0-9]", "save7"));
        assert!(!glob_match("save[0-9]", "saveA"));
        assert!(glob_match("[abc]x", "bx"));
        assert!(glob_match("[!abc]x", "dx"));
        assert!(!glob_match("[!abc]x", "ax"));
        assert!(glob_match("[^a]", "b"));
        assert!(glob_match("[]]", "]"));
        assert!(glob_match("[a-]", "-"));
    }

    #[test]
    fn escapes_and_literal_fallbacks() {
        assert!(glob_match(r"\*", "*"));
        assert!(!glob_match(r"\*", "x"));
        assert!(glob_match("[abc", "[abc"));
        assert!(glob_match(r"tail\", r"tail\"));
    }

    #[test]
    fn non_ascii_names() {
        assert!(glob_match("h?llo", "hällo"));
        assert!(glob_match("*ö", "schön"));
    }
}
