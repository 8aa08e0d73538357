//! Running postfix expressions against the [`Store`].
//!
//! Every operator's result is appended to the end of the store as soon as it
//! is computed so later operators can refer to it. Once the whole expression
//! has been evaluated only the final result is kept (and renamed to suit its
//! new neighbour). If anything goes wrong, every intermediate this evaluation
//! created is deleted again.

use crate::{
    matrix::Matrix,
    ops::{self, AlgebraError},
    parse::{TokenKind, TERMINATOR},
    rational::{Rational, RationalError},
    store::{Position, Store},
};
use arrayvec::ArrayVec;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("There is no matrix called \"{name}\"")]
    UnknownMatrix { name: SmolStr },
    #[error("The expression is malformed")]
    MalformedExpression,
    #[error("The expression doesn't apply any operators")]
    NoOperators,
    #[error("At least one side of a multiplication must be a matrix")]
    NoMatrixOperand,
    #[error("Invalid number")]
    Number(#[from] RationalError),
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

/// Evaluate a postfix expression, returning the position of the result.
pub fn evaluate(
    store: &mut Store,
    postfix: &str,
) -> Result<Position, EvaluationError> {
    tracing::debug!(%postfix, "Evaluating");

    let mut ctx = EvaluationContext::new(store);

    match ctx.run(postfix) {
        Ok(result) => Ok(ctx.finish(result)),
        Err(e) => {
            ctx.roll_back(&e);
            Err(e)
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    /// A matrix the user referred to by name.
    Name(SmolStr),
    /// A number, which is only meaningful as one side of a `*`.
    Literal(SmolStr),
    /// Something calculated earlier in this evaluation.
    Intermediate(Position),
}

impl Operand {
    fn from_token(token: &str) -> Self {
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            Operand::Literal(SmolStr::new(token))
        } else {
            Operand::Name(SmolStr::new(token))
        }
    }
}

#[derive(Debug)]
struct EvaluationContext<'s> {
    store: &'s mut Store,
    /// Results appended to the store during this evaluation, oldest first.
    intermediates: Vec<Position>,
}

impl<'s> EvaluationContext<'s> {
    fn new(store: &'s mut Store) -> Self {
        EvaluationContext {
            store,
            intermediates: Vec::new(),
        }
    }

    fn run(&mut self, postfix: &str) -> Result<Position, EvaluationError> {
        let mut operands: Vec<Operand> = Vec::new();
        let mut token = String::new();

        for c in postfix.chars() {
            if c == TERMINATOR {
                if token.is_empty() {
                    return Err(EvaluationError::MalformedExpression);
                }
                operands.push(Operand::from_token(&token));
                token.clear();
                continue;
            }

            let operator = match TokenKind::from_char(c) {
                Some(operator) => operator,
                None => {
                    if !c.is_whitespace() {
                        token.push(c);
                    }
                    continue;
                },
            };

            let arity = operator.arity();
            if !token.is_empty() || arity == 0 || operands.len() < arity {
                return Err(EvaluationError::MalformedExpression);
            }

            let args: ArrayVec<[Operand; 2]> =
                operands.drain(operands.len() - arity..).collect();
            let result = self.apply(operator, &args)?;

            let position = self.store.insert_back(result);
            self.intermediates.push(position);
            tracing::debug!(
                operator = %operator.symbol(),
                name = self.store.name(position).unwrap_or_default(),
                "Applied an operator"
            );

            operands.push(Operand::Intermediate(position));
        }

        if !token.is_empty() {
            return Err(EvaluationError::MalformedExpression);
        }
        if self.intermediates.is_empty() {
            return Err(EvaluationError::NoOperators);
        }

        match operands.as_slice() {
            [Operand::Intermediate(result)] => Ok(*result),
            _ => Err(EvaluationError::MalformedExpression),
        }
    }

    fn apply(
        &self,
        operator: TokenKind,
        args: &[Operand],
    ) -> Result<Matrix, EvaluationError> {
        let result = match (operator, args) {
            (TokenKind::Times, [Operand::Literal(_), Operand::Literal(_)]) => {
                return Err(EvaluationError::NoMatrixOperand)
            },
            (TokenKind::Times, [Operand::Literal(factor), matrix])
            | (TokenKind::Times, [matrix, Operand::Literal(factor)]) => {
                let factor: Rational = factor.parse()?;
                ops::scale(self.lookup(matrix)?, factor)?
            },
            (TokenKind::Times, [left, right]) => {
                ops::multiply(self.lookup(left)?, self.lookup(right)?)?
            },
            (TokenKind::Plus, [left, right]) => {
                ops::add(self.lookup(left)?, self.lookup(right)?)?
            },
            (TokenKind::Minus, [left, right]) => {
                ops::subtract(self.lookup(left)?, self.lookup(right)?)?
            },
            (TokenKind::Transpose, [operand]) => {
                ops::transpose(self.lookup(operand)?)
            },
            (TokenKind::ReducedRowEchelonForm, [operand]) => {
                ops::reduced_row_echelon_form(self.lookup(operand)?)?
            },
            (TokenKind::Invert, [operand]) => {
                ops::invert(self.lookup(operand)?)?
            },
            (TokenKind::Determinant, [operand]) => {
                let det = ops::determinant(self.lookup(operand)?)?;
                Matrix::from([[det]])
            },
            _ => return Err(EvaluationError::MalformedExpression),
        };

        Ok(result)
    }

    fn lookup(&self, operand: &Operand) -> Result<&Matrix, EvaluationError> {
        match operand {
            Operand::Name(name) | Operand::Literal(name) => self
                .store
                .iter()
                .filter(|(position, _)| !self.intermediates.contains(position))
                .find(|(_, entry)| entry.name == *name)
                .map(|(_, entry)| &entry.matrix)
                .ok_or_else(|| EvaluationError::UnknownMatrix {
                    name: name.clone(),
                }),
            Operand::Intermediate(position) => self
                .store
                .value(*position)
                .ok_or(EvaluationError::MalformedExpression),
        }
    }

    /// Throw away everything except the final result, then give it the name
    /// it would have had if it were inserted directly.
    fn finish(self, result: Position) -> Position {
        let discarded = self.intermediates.len().saturating_sub(1);

        for &position in &self.intermediates {
            if position != result {
                let _ = self.store.delete(position);
            }
        }

        let name = self.store.rename_from_predecessor(result);
        tracing::debug!(?name, discarded, "Evaluation finished");

        result
    }

    fn roll_back(self, error: &EvaluationError) {
        tracing::warn!(
            %error,
            intermediates = self.intermediates.len(),
            "Evaluation failed, rolling back"
        );

        for position in self.intermediates {
            let _ = self.store.delete(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `A = [[1, 2], [3, 4]]` and `B = I`.
    fn store() -> Store {
        let mut store = Store::new();
        store.insert_back(Matrix::from_integers([[1, 2], [3, 4]]));
        store.insert_back(Matrix::identity(2));
        store
    }

    fn names(store: &Store) -> Vec<&str> {
        store.iter().map(|(_, entry)| entry.name.as_str()).collect()
    }

    macro_rules! evaluate_test {
        ($name:ident, $postfix:expr => $should_be:expr) => {
            #[test]
            fn $name() {
                let mut store = store();

                let position = evaluate(&mut store, $postfix).unwrap();

                assert_eq!(
                    store.value(position),
                    Some(&Matrix::from_integers($should_be))
                );
                assert_eq!(names(&store), vec!["A", "B", "C"]);
            }
        };
        ($name:ident, $postfix:expr => err $should_be:expr) => {
            #[test]
            fn $name() {
                let mut store = store();

                let got = evaluate(&mut store, $postfix);

                assert_eq!(got, Err($should_be));
                assert_eq!(names(&store), vec!["A", "B"]);
            }
        };
    }

    evaluate_test!(add, "A'B'+" => [[2, 2], [3, 5]]);
    evaluate_test!(subtract, "A'B'-" => [[0, 2], [3, 3]]);
    evaluate_test!(right_operand_is_on_top, "B'A'-" => [[0, -2], [-3, -3]]);
    evaluate_test!(multiply, "A'A'*" => [[7, 10], [15, 22]]);
    evaluate_test!(scale_on_the_left, "2'A'*" => [[2, 4], [6, 8]]);
    evaluate_test!(scale_on_the_right, "A'3'*" => [[3, 6], [9, 12]]);
    evaluate_test!(transpose, "A'|" => [[1, 3], [2, 4]]);
    evaluate_test!(rref, "A'^" => [[1, 0], [0, 1]]);
    evaluate_test!(determinant, "A'#" => [[-2]]);
    evaluate_test!(chained, "A'B'A'*+" => [[2, 4], [6, 8]]);
    evaluate_test!(
        intermediate_used_twice_in_a_row,
        "A'|B'+|" => [[2, 2], [3, 5]]
    );
    evaluate_test!(
        unknown_matrix,
        "A'C'+" => err EvaluationError::UnknownMatrix { name: "C".into() }
    );
    evaluate_test!(
        literal_outside_multiplication,
        "2'A'+" => err EvaluationError::UnknownMatrix { name: "2".into() }
    );
    evaluate_test!(
        two_literals,
        "2'3'*" => err EvaluationError::NoMatrixOperand
    );
    evaluate_test!(
        bad_literal,
        "1.2.3'A'*" => err EvaluationError::Number(RationalError::InvalidFormat)
    );
    evaluate_test!(
        too_few_operands,
        "A'+" => err EvaluationError::MalformedExpression
    );
    evaluate_test!(
        leftover_operands,
        "A'B'A'+" => err EvaluationError::MalformedExpression
    );
    evaluate_test!(
        unterminated_operand,
        "A'B+" => err EvaluationError::MalformedExpression
    );
    evaluate_test!(nothing_to_do, "A'" => err EvaluationError::NoOperators);
    evaluate_test!(
        singular_intermediate_is_rolled_back,
        "B'B'-&" => err EvaluationError::Algebra(AlgebraError::Singular)
    );
    evaluate_test!(
        failing_late_rolls_back_everything,
        "A'B'+A'*D'+" => err EvaluationError::UnknownMatrix { name: "D".into() }
    );

    #[test]
    fn intermediates_cant_be_referred_to_by_name() {
        let mut store = store();

        // the first sum is temporarily stored as "C"
        let got = evaluate(&mut store, "A'B'+C'+");

        assert_eq!(
            got,
            Err(EvaluationError::UnknownMatrix { name: "C".into() })
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn mismatched_dimensions() {
        let mut store = store();
        store.insert_back(Matrix::from_integers([[1, 2, 3]]));

        let got = evaluate(&mut store, "A'C'+");

        assert_eq!(
            got,
            Err(EvaluationError::Algebra(AlgebraError::DimensionMismatch {
                left: (2, 2),
                right: (1, 3)
            }))
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn result_is_renamed_after_cleanup() {
        let mut store = store();

        // creates C, D and E before throwing away C and D
        let position = evaluate(&mut store, "A'|B'+A'*").unwrap();

        assert_eq!(store.name(position), Some("C"));
        assert_eq!(names(&store), vec!["A", "B", "C"]);
        assert_eq!(
            store.value(position),
            Some(&Matrix::from_integers([[11, 16], [17, 24]]))
        );
    }

    #[test]
    fn fractional_scale_factor() {
        let mut store = store();

        let position = evaluate(&mut store, "0.5'A'*").unwrap();

        let half = Rational::new(1, 2).unwrap();
        let should_be = Matrix::from([
            [half, Rational::ONE],
            [Rational::new(3, 2).unwrap(), Rational::from_integer(2)],
        ]);
        assert_eq!(store.value(position), Some(&should_be));
    }
}
