//! A calculator for matrices of exact fractions.
//!
//! Matrices live in a [`Store`] under positional names (`A`, `B`, ...) and are
//! combined using infix expressions like `"(A' + B')&"`, where every operand
//! is terminated by a `'`.
//!
//! ```rust
//! use ratmat::Calculator;
//!
//! let mut calculator = Calculator::default();
//! let a = calculator.create_blank(2, 2).unwrap();
//! calculator.set_element(a, 0, 0, "1/2").unwrap();
//! calculator.set_element(a, 1, 1, "4").unwrap();
//!
//! let got = calculator.evaluate("A'&", true, false).unwrap();
//!
//! assert_eq!(got.name.as_deref(), Some("B"));
//! assert_eq!(calculator.render(&got.matrix), "2   0\n0 1/4\n");
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod calculator;
pub mod eval;
mod matrix;
pub mod ops;
pub mod parse;
mod rational;
pub mod store;

pub use calculator::{
    Calculator, Config, Error, ErrorKind, Evaluation, Listing, FORMAT_VARIABLE,
};
pub use matrix::Matrix;
pub use rational::{Format, Rational, RationalError, ACCURACY_LIMIT};
pub use store::{Entry, Position, Store};
