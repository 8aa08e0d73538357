//! The interface a front end talks to.

use crate::{
    eval::{self, EvaluationError},
    matrix::Matrix,
    ops::AlgebraError,
    parse::{self, ParseError},
    rational::{Format, Rational, RationalError},
    store::{Position, Store},
};
use smol_str::SmolStr;
use thiserror::Error;

/// The environment variable [`Config::from_env()`] reads the print format
/// from.
pub const FORMAT_VARIABLE: &str = "RATMAT_FORMAT";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// How numbers are printed.
    pub format: Format,
}

impl Config {
    /// Load the config from the environment, falling back to the defaults
    /// for anything missing or invalid.
    pub fn from_env() -> Self {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(FORMAT_VARIABLE) {
            match value.parse() {
                Ok(format) => config.format = format,
                Err(e) => {
                    tracing::warn!(
                        variable = FORMAT_VARIABLE,
                        %value,
                        error = %e,
                        "Ignoring an invalid print format"
                    );
                },
            }
        }

        config
    }
}

/// Everything that can go wrong while using the [`Calculator`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Number(#[from] RationalError),
    #[error(
        "A matrix needs at least one row and one column, not {rows}x{columns}"
    )]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("There is no element at row {row}, column {column}")]
    IndexOutOfBounds { row: usize, column: usize },
    #[error("That matrix no longer exists")]
    UnknownPosition,
}

impl Error {
    /// The broad category this error falls into, for front ends which only
    /// care about what sort of message to show.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(e) => parse_kind(e),
            Error::Evaluation(e) => evaluation_kind(e),
            Error::Number(e) => rational_kind(e),
            Error::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Error::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Error::UnknownPosition => ErrorKind::UnknownMatrix,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DenominatorZero,
    InvalidFormat,
    IndexOutOfBounds,
    NegativeParameter,
    Overflow,
    DimensionMismatch,
    Singular,
    NotInvertible,
    MalformedExpression,
    UnmatchedBrackets,
    NoOperators,
    UnknownMatrix,
    NoMatrixOperand,
    InvalidDimensions,
}

fn rational_kind(e: &RationalError) -> ErrorKind {
    match e {
        RationalError::DenominatorZero => ErrorKind::DenominatorZero,
        RationalError::InvalidFormat => ErrorKind::InvalidFormat,
        RationalError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
        RationalError::NegativeParameter { .. } => ErrorKind::NegativeParameter,
        RationalError::Overflow => ErrorKind::Overflow,
    }
}

fn algebra_kind(e: &AlgebraError) -> ErrorKind {
    match e {
        AlgebraError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        AlgebraError::Singular => ErrorKind::Singular,
        AlgebraError::NotInvertible => ErrorKind::NotInvertible,
        AlgebraError::Arithmetic(inner) => rational_kind(inner),
    }
}

fn parse_kind(e: &ParseError) -> ErrorKind {
    match e {
        ParseError::InvalidCharacter { .. }
        | ParseError::MalformedExpression => ErrorKind::MalformedExpression,
        ParseError::UnmatchedBrackets => ErrorKind::UnmatchedBrackets,
        ParseError::NoOperators => ErrorKind::NoOperators,
    }
}

fn evaluation_kind(e: &EvaluationError) -> ErrorKind {
    match e {
        EvaluationError::UnknownMatrix { .. } => ErrorKind::UnknownMatrix,
        EvaluationError::MalformedExpression => ErrorKind::MalformedExpression,
        EvaluationError::NoOperators => ErrorKind::NoOperators,
        EvaluationError::NoMatrixOperand => ErrorKind::NoMatrixOperand,
        EvaluationError::Number(inner) => rational_kind(inner),
        EvaluationError::Algebra(inner) => algebra_kind(inner),
    }
}

/// The result of a successful [`Calculator::evaluate()`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The name the result was saved under, if it was kept.
    pub name: Option<SmolStr>,
    pub position: Option<Position>,
    pub matrix: Matrix,
    /// Whether the front end asked to be shown the result.
    pub preview: bool,
}

/// One line in the list of matrices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: SmolStr,
    pub position: Position,
    pub rows: usize,
    pub columns: usize,
}

/// A matrix calculator session.
#[derive(Debug, Default, Clone)]
pub struct Calculator {
    store: Store,
    config: Config,
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Calculator {
            store: Store::new(),
            config,
        }
    }

    pub fn store(&self) -> &Store { &self.store }

    pub fn config(&self) -> &Config { &self.config }

    pub fn format(&self) -> Format { self.config.format }

    pub fn set_format(&mut self, format: Format) {
        tracing::debug!(?format, "Changing the print format");
        self.config.format = format;
    }

    /// Validate, translate and evaluate an infix expression like
    /// `"A'*(B'+C')&"`.
    ///
    /// When `persist` is `false` the result is taken back out of the store
    /// and only handed to the caller.
    pub fn evaluate(
        &mut self,
        expression: &str,
        persist: bool,
        preview: bool,
    ) -> Result<Evaluation, Error> {
        parse::validate(expression)?;
        let postfix = parse::infix_to_postfix(expression)?;
        tracing::debug!(%expression, %postfix, "Translated to postfix");

        let position = eval::evaluate(&mut self.store, &postfix)?;

        if persist {
            let entry =
                self.store.entry(position).ok_or(Error::UnknownPosition)?;

            Ok(Evaluation {
                name: Some(entry.name.clone()),
                position: Some(position),
                matrix: entry.matrix.clone(),
                preview,
            })
        } else {
            let entry =
                self.store.remove(position).ok_or(Error::UnknownPosition)?;

            Ok(Evaluation {
                name: None,
                position: None,
                matrix: entry.matrix,
                preview,
            })
        }
    }

    /// Every matrix in the store, in order.
    pub fn list(&self) -> Vec<Listing> {
        self.store
            .iter()
            .map(|(position, entry)| Listing {
                name: entry.name.clone(),
                position,
                rows: entry.matrix.row_count(),
                columns: entry.matrix.column_count(),
            })
            .collect()
    }

    /// Add a matrix full of zeroes to the end of the store.
    pub fn create_blank(
        &mut self,
        rows: usize,
        columns: usize,
    ) -> Result<Position, Error> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidDimensions { rows, columns });
        }

        Ok(self.store.insert_back(Matrix::zeros(rows, columns)))
    }

    /// Parse `text` as a [`Rational`] and write it into a stored matrix.
    pub fn set_element(
        &mut self,
        position: Position,
        row: usize,
        column: usize,
        text: &str,
    ) -> Result<(), Error> {
        let value: Rational = text.parse()?;

        let matrix =
            self.store.value_mut(position).ok_or(Error::UnknownPosition)?;
        let cell = matrix
            .get_mut(row, column)
            .ok_or(Error::IndexOutOfBounds { row, column })?;

        *cell = value;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Matrix> {
        self.store
            .find(name)
            .and_then(|position| self.store.value(position))
    }

    /// Delete every matrix with one of these names, returning how many were
    /// removed.
    pub fn delete<'a, I>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut deleted = 0;

        for name in names {
            while let Some(position) = self.store.find(name) {
                if self.store.remove(position).is_none() {
                    break;
                }
                deleted += 1;
            }
        }

        deleted
    }

    /// Print a matrix using the current format.
    pub fn render(&self, matrix: &Matrix) -> String {
        matrix.render(self.config.format)
    }
}
