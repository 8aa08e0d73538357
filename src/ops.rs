//! [`Matrix`] operations.
//!
//! Every operation allocates a brand new matrix for its result and never
//! mutates its inputs. Dimensions are checked up front, so a mismatch is
//! reported as [`AlgebraError::DimensionMismatch`] instead of reading out of
//! bounds.

use crate::{
    matrix::Matrix,
    rational::{Rational, RationalError},
};
use thiserror::Error;

/// Things that can go wrong while doing matrix algebra.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    #[error(
        "The matrices' dimensions do not match ({left:?} vs {right:?})"
    )]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("The matrix is singular")]
    Singular,
    #[error("The matrix doesn't have an inverse")]
    NotInvertible,
    #[error(transparent)]
    Arithmetic(#[from] RationalError),
}

fn mismatch<L, R>(left: &Matrix<L>, right: &Matrix<R>) -> AlgebraError {
    AlgebraError::DimensionMismatch {
        left: left.dimensions(),
        right: right.dimensions(),
    }
}

pub fn add(left: &Matrix, right: &Matrix) -> Result<Matrix, AlgebraError> {
    elementwise(left, right, Rational::checked_add)
}

pub fn subtract(left: &Matrix, right: &Matrix) -> Result<Matrix, AlgebraError> {
    elementwise(left, right, Rational::checked_sub)
}

fn elementwise<F>(
    left: &Matrix,
    right: &Matrix,
    mut op: F,
) -> Result<Matrix, AlgebraError>
where
    F: FnMut(Rational, Rational) -> Result<Rational, RationalError>,
{
    if left.dimensions() != right.dimensions() {
        return Err(mismatch(left, right));
    }

    left.try_map(|row, column, value| -> Result<Rational, AlgebraError> {
        Ok(op(*value, right[(row, column)])?)
    })
}

/// Matrix multiplication, where `left` must have as many columns as `right`
/// has rows.
pub fn multiply(left: &Matrix, right: &Matrix) -> Result<Matrix, AlgebraError> {
    if left.column_count() != right.row_count() {
        return Err(mismatch(left, right));
    }

    Matrix::try_init(
        left.row_count(),
        right.column_count(),
        |row, column| -> Result<Rational, AlgebraError> {
            let mut sum = Rational::ZERO;

            for i in 0..left.column_count() {
                let product = left[(row, i)].checked_mul(right[(i, column)])?;
                sum = sum.checked_add(product)?;
            }

            Ok(sum)
        },
    )
}

/// Multiply every element by a number.
pub fn scale(
    matrix: &Matrix,
    factor: Rational,
) -> Result<Matrix, AlgebraError> {
    matrix.try_map(|_, _, value| -> Result<Rational, AlgebraError> {
        Ok(value.checked_mul(factor)?)
    })
}

pub fn transpose<T: Clone>(matrix: &Matrix<T>) -> Matrix<T> {
    Matrix::init(matrix.column_count(), matrix.row_count(), |row, column| {
        matrix[(column, row)].clone()
    })
}

/// Calculate the reduced row echelon form using Gauss-Jordan elimination.
///
/// Arithmetic is exact, so the first non-zero entry in a column is as good a
/// pivot as any other. Zeroes are always canonical, so no `-0` can appear in
/// the result.
pub fn reduced_row_echelon_form(
    matrix: &Matrix,
) -> Result<Matrix, AlgebraError> {
    let mut reduced = matrix.clone();
    let (rows, columns) = reduced.dimensions();

    let mut pivot_row = 0;
    let mut column = 0;

    while pivot_row < rows && column < columns {
        let candidate =
            (pivot_row..rows).find(|&row| !reduced[(row, column)].is_zero());

        let source = match candidate {
            Some(row) => row,
            None => {
                // nothing left to eliminate in this column
                column += 1;
                continue;
            },
        };

        reduced.swap_rows(pivot_row, source);

        let pivot = reduced[(pivot_row, column)];
        for i in 0..columns {
            reduced[(pivot_row, i)] =
                reduced[(pivot_row, i)].checked_div(pivot)?;
        }

        for row in 0..rows {
            let factor = reduced[(row, column)];
            if row == pivot_row || factor.is_zero() {
                continue;
            }

            for i in 0..columns {
                let scaled = reduced[(pivot_row, i)].checked_mul(factor)?;
                reduced[(row, i)] = reduced[(row, i)].checked_sub(scaled)?;
            }
        }

        pivot_row += 1;
        column += 1;
    }

    Ok(reduced)
}

/// Calculate the determinant using cofactor expansion along the first row.
///
/// Only square matrices have a determinant. Anything else gives back zero
/// rather than an error.
pub fn determinant(matrix: &Matrix) -> Result<Rational, AlgebraError> {
    if !matrix.is_square() {
        return Ok(Rational::ZERO);
    }

    match matrix.row_count() {
        0 => Ok(Rational::ZERO),
        1 => Ok(matrix[(0, 0)]),
        2 => {
            let ad = matrix[(0, 0)].checked_mul(matrix[(1, 1)])?;
            let bc = matrix[(0, 1)].checked_mul(matrix[(1, 0)])?;
            Ok(ad.checked_sub(bc)?)
        },
        size => {
            let mut det = Rational::ZERO;

            for column in 0..size {
                let element = matrix[(0, column)];
                if element.is_zero() {
                    continue;
                }

                let sub_determinant = determinant(&minor(matrix, 0, column))?;
                let cofactor = element.checked_mul(sub_determinant)?;

                det = if column % 2 == 0 {
                    det.checked_add(cofactor)?
                } else {
                    det.checked_sub(cofactor)?
                };
            }

            Ok(det)
        },
    }
}

/// The matrix left over after deleting a row and a column.
fn minor(matrix: &Matrix, row: usize, column: usize) -> Matrix {
    let size = matrix.row_count() - 1;

    Matrix::init(size, size, |r, c| {
        let r = if r >= row { r + 1 } else { r };
        let c = if c >= column { c + 1 } else { c };
        matrix[(r, c)]
    })
}

/// Invert a square matrix by running Gauss-Jordan elimination on `[A | I]`.
pub fn invert(matrix: &Matrix) -> Result<Matrix, AlgebraError> {
    if !matrix.is_square() {
        return Err(mismatch(matrix, matrix));
    }

    if determinant(matrix)?.is_zero() {
        return Err(AlgebraError::Singular);
    }

    let identity = Matrix::identity(matrix.row_count());
    let augmented = put_together(matrix, &identity)?;
    let reduced = reduced_row_echelon_form(&augmented)?;
    let (left, inverse) = split_apart(&reduced, matrix.column_count());

    // unreachable with a non-zero determinant
    if left == identity {
        Ok(inverse)
    } else {
        Err(AlgebraError::NotInvertible)
    }
}

/// Glue two matrices with the same number of rows together side by side.
pub fn put_together<T: Clone>(
    left: &Matrix<T>,
    right: &Matrix<T>,
) -> Result<Matrix<T>, AlgebraError> {
    if left.row_count() != right.row_count() {
        return Err(mismatch(left, right));
    }

    let split = left.column_count();

    Ok(Matrix::init(
        left.row_count(),
        split + right.column_count(),
        |row, column| {
            if column < split {
                left[(row, column)].clone()
            } else {
                right[(row, column - split)].clone()
            }
        },
    ))
}

/// The inverse of [`put_together()`], splitting a matrix into the first
/// `left_columns` columns and everything after them.
pub fn split_apart<T: Clone>(
    matrix: &Matrix<T>,
    left_columns: usize,
) -> (Matrix<T>, Matrix<T>) {
    let split = left_columns.min(matrix.column_count());
    let rows = matrix.row_count();

    let left = Matrix::init(rows, split, |row, column| {
        matrix[(row, column)].clone()
    });
    let right_columns = matrix.column_count() - split;
    let right = Matrix::init(rows, right_columns, |row, column| {
        matrix[(row, column + split)].clone()
    });

    (left, right)
}
