//! Checking infix expressions and turning them into postfix.
//!
//! Operands are matrix names (runs of uppercase letters) or decimal literals,
//! each closed off by a `'`. The binary operators are `+`, `-` and `*`. The
//! unary operators are written after their operand: `|` (transpose),
//! `^` (reduced row echelon form), `&` (invert) and `#` (determinant).

use thiserror::Error;

/// The marker which ends every operand.
pub const TERMINATOR: char = '\'';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid character, \"{character}\", at index {index}")]
    InvalidCharacter { character: char, index: usize },
    #[error("The expression is malformed")]
    MalformedExpression,
    #[error("The brackets don't match up")]
    UnmatchedBrackets,
    #[error("The expression doesn't contain any operators")]
    NoOperators,
}

/// The symbols which mean something to the translator. Anything else is part
/// of an operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plus,
    Minus,
    Times,
    Transpose,
    ReducedRowEchelonForm,
    Invert,
    Determinant,
    OpenParen,
    CloseParen,
}

impl TokenKind {
    pub fn from_char(c: char) -> Option<TokenKind> {
        match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Times),
            '|' => Some(TokenKind::Transpose),
            '^' => Some(TokenKind::ReducedRowEchelonForm),
            '&' => Some(TokenKind::Invert),
            '#' => Some(TokenKind::Determinant),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            TokenKind::Plus => '+',
            TokenKind::Minus => '-',
            TokenKind::Times => '*',
            TokenKind::Transpose => '|',
            TokenKind::ReducedRowEchelonForm => '^',
            TokenKind::Invert => '&',
            TokenKind::Determinant => '#',
            TokenKind::OpenParen => '(',
            TokenKind::CloseParen => ')',
        }
    }

    /// How many operands the operator consumes. Brackets don't take any.
    pub fn arity(self) -> usize {
        match self.precedence() {
            Precedence::Low | Precedence::Medium => 2,
            Precedence::High => 1,
            Precedence::Open | Precedence::Close => 0,
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            TokenKind::Plus | TokenKind::Minus => Precedence::Low,
            TokenKind::Times => Precedence::Medium,
            TokenKind::Transpose
            | TokenKind::ReducedRowEchelonForm
            | TokenKind::Invert
            | TokenKind::Determinant => Precedence::High,
            TokenKind::OpenParen => Precedence::Open,
            TokenKind::CloseParen => Precedence::Close,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Low,
    Medium,
    High,
    Open,
    Close,
}

/// A quick sanity check over the raw text before it gets translated.
///
/// Every operand needs its own terminator and there must be exactly one more
/// operand than there are binary operators.
pub fn validate(src: &str) -> Result<(), ParseError> {
    let mut arguments = 0;
    let mut operators = 0;
    let mut terminators = 0;

    let mut chars = src.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match c {
            'A'..='Z' => {
                arguments += 1;
                while chars
                    .next_if(|(_, c)| c.is_ascii_uppercase())
                    .is_some()
                {}
            },
            '0'..='9' => {
                arguments += 1;
                while chars
                    .next_if(|(_, c)| c.is_ascii_digit() || *c == '.')
                    .is_some()
                {}
            },
            '+' | '-' | '*' => operators += 1,
            TERMINATOR => terminators += 1,
            '|' | '^' | '&' | '#' | '(' | ')' => {},
            c if c.is_whitespace() => {},
            character => {
                return Err(ParseError::InvalidCharacter { character, index })
            },
        }
    }

    if arguments == terminators && arguments == operators + 1 {
        Ok(())
    } else {
        Err(ParseError::MalformedExpression)
    }
}

/// Convert an infix expression to postfix using the shunting yard algorithm.
///
/// Operands are copied to the output untouched and whitespace is dropped.
/// Operators of equal precedence are applied left to right.
pub fn infix_to_postfix(src: &str) -> Result<String, ParseError> {
    let mut output = String::with_capacity(src.len());
    let mut stack: Vec<TokenKind> = Vec::new();
    let mut depth = 0_usize;
    let mut saw_operator = false;

    for c in src.chars().filter(|c| !c.is_whitespace()) {
        match TokenKind::from_char(c) {
            None => output.push(c),
            Some(TokenKind::OpenParen) => {
                depth += 1;
                stack.push(TokenKind::OpenParen);
            },
            Some(TokenKind::CloseParen) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ParseError::UnmatchedBrackets)?;

                while let Some(top) = stack.pop() {
                    if top == TokenKind::OpenParen {
                        break;
                    }
                    output.push(top.symbol());
                }
            },
            Some(operator) => {
                saw_operator = true;

                while let Some(&top) = stack.last() {
                    if top == TokenKind::OpenParen
                        || top.precedence() < operator.precedence()
                    {
                        break;
                    }

                    output.push(top.symbol());
                    stack.pop();
                }

                stack.push(operator);
            },
        }
    }

    if depth != 0 {
        return Err(ParseError::UnmatchedBrackets);
    }
    if !saw_operator {
        return Err(ParseError::NoOperators);
    }

    while let Some(operator) = stack.pop() {
        output.push(operator.symbol());
    }

    Ok(output)
}
