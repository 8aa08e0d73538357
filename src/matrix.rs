//! A dense, row-major matrix. Only the container lives here, the algebra is
//! in [`crate::ops`].

use crate::rational::{Format, Rational};
use std::{
    fmt::{self, Debug, Formatter},
    ops::{Index, IndexMut},
};

/// A general-purpose MxN matrix laid out sequentially in memory, row by row.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T = Rational> {
    cells: Box<[T]>,
    rows: usize,
    columns: usize,
}

impl<T> Matrix<T> {
    /// Create a new [`Matrix`] by invoking some `fn(row, column) -> T`
    /// function for each cell.
    pub fn init<F>(rows: usize, columns: usize, mut get_cell: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut cells = Vec::with_capacity(rows * columns);

        for row in 0..rows {
            for column in 0..columns {
                cells.push(get_cell(row, column));
            }
        }

        Matrix {
            cells: cells.into_boxed_slice(),
            rows,
            columns,
        }
    }

    /// A version of [`Matrix::init()`] which lets you initialize a matrix
    /// using a function which may fail.
    pub fn try_init<F, E>(
        rows: usize,
        columns: usize,
        mut get_cell: F,
    ) -> Result<Self, E>
    where
        F: FnMut(usize, usize) -> Result<T, E>,
    {
        let mut cells = Vec::with_capacity(rows * columns);

        for row in 0..rows {
            for column in 0..columns {
                cells.push(get_cell(row, column)?);
            }
        }

        Ok(Matrix {
            cells: cells.into_boxed_slice(),
            rows,
            columns,
        })
    }

    pub fn row_count(&self) -> usize { self.rows }

    pub fn column_count(&self) -> usize { self.columns }

    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) { (self.rows, self.columns) }

    pub fn is_square(&self) -> bool { self.rows == self.columns }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact() panics on a chunk size of zero
        let columns = self.columns.max(1);
        self.cells.chunks_exact(columns).take(self.rows)
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        let ix = self.index(row, column)?;
        self.cells.get(ix)
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        let ix = self.index(row, column)?;
        self.cells.get_mut(ix)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> &[T] { &self.cells }

    pub fn swap_rows(&mut self, first: usize, second: usize) {
        if first == second {
            return;
        }

        for column in 0..self.columns {
            let columns = self.columns;
            self.cells
                .swap(first * columns + column, second * columns + column);
        }
    }

    pub fn try_map<F, Q, E>(&self, mut func: F) -> Result<Matrix<Q>, E>
    where
        F: FnMut(usize, usize, &T) -> Result<Q, E>,
    {
        Matrix::try_init(self.rows, self.columns, |row, column| {
            func(row, column, &self[(row, column)])
        })
    }
}

impl Matrix<Rational> {
    /// A matrix where every element is zero.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Matrix::init(rows, columns, |_, _| Rational::ZERO)
    }

    pub fn identity(size: usize) -> Self {
        Matrix::init(size, size, |row, column| {
            if row == column {
                Rational::ONE
            } else {
                Rational::ZERO
            }
        })
    }

    /// Build a matrix of whole numbers, mostly useful in tests.
    pub fn from_integers<const COLUMNS: usize, const ROWS: usize>(
        values: [[i64; COLUMNS]; ROWS],
    ) -> Self {
        Matrix::<i64>::from(values).map_cells(Rational::from_integer)
    }

    /// Print the matrix as a grid, one row per line, with each column padded
    /// to the width of its widest element.
    pub fn render(&self, format: Format) -> String {
        let text: Vec<String> = self
            .cells
            .iter()
            .map(|cell| cell.display(format).to_string())
            .collect();

        let mut widths = vec![0; self.columns];
        for (ix, cell) in text.iter().enumerate() {
            let column = ix % self.columns;
            widths[column] = widths[column].max(cell.len());
        }

        let mut rendered = String::new();

        for (ix, cell) in text.iter().enumerate() {
            let column = ix % self.columns;
            if column > 0 {
                rendered.push(' ');
            }
            let width = widths[column];
            rendered.push_str(&format!("{:>width$}", cell, width = width));
            if column + 1 == self.columns {
                rendered.push('\n');
            }
        }

        rendered
    }
}

impl<T: Debug> Debug for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows, "Row index out of bounds");
        assert!(column < self.columns, "Column index out of bounds");

        &self.cells[row * self.columns + column]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(
        &mut self,
        (row, column): (usize, usize),
    ) -> &mut Self::Output {
        assert!(row < self.rows, "Row index out of bounds");
        assert!(column < self.columns, "Column index out of bounds");

        &mut self.cells[row * self.columns + column]
    }
}

impl<T, const COLUMNS: usize, const ROWS: usize> From<[[T; COLUMNS]; ROWS]>
    for Matrix<T>
{
    fn from(other: [[T; COLUMNS]; ROWS]) -> Self {
        let cells: Vec<T> = IntoIterator::into_iter(other)
            .flat_map(IntoIterator::into_iter)
            .collect();

        Matrix {
            cells: cells.into_boxed_slice(),
            rows: ROWS,
            columns: COLUMNS,
        }
    }
}

impl<T> Matrix<T> {
    fn map_cells<Q, F>(self, func: F) -> Matrix<Q>
    where
        F: FnMut(T) -> Q,
    {
        let Matrix {
            cells,
            rows,
            columns,
        } = self;

        Matrix {
            cells: cells.into_vec().into_iter().map(func).collect(),
            rows,
            columns,
        }
    }
}

impl<T: PartialEq, const COLUMNS: usize, const ROWS: usize>
    PartialEq<[[T; COLUMNS]; ROWS]> for Matrix<T>
{
    fn eq(&self, other: &[[T; COLUMNS]; ROWS]) -> bool {
        self.rows == ROWS
            && self.columns == COLUMNS
            && self
                .rows()
                .zip(other.iter())
                .all(|(left, right)| left == &right[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_representation() {
        let matrix = Matrix::init(2, 3, |row, column| column + row);
        let should_be = "[[0, 1, 2], [1, 2, 3]]";

        let got = format!("{:?}", matrix);

        assert_eq!(got, should_be);
    }

    #[test]
    fn wide_matrix_from_array() {
        let array = [[1, 2, 3, 4], [5, 6, 7, 8]];

        let got = Matrix::from(array);

        assert_eq!(got, array);
        assert_eq!(got.dimensions(), (2, 4));
        assert_eq!(got[(1, 2)], 7);
    }

    #[test]
    fn tall_matrix_from_array() {
        let array = [[1, 2], [3, 4], [5, 6], [7, 8]];

        let got = Matrix::from(array);

        assert_eq!(got, array);
        assert_eq!(got.row(2), &[5, 6]);
    }

    #[test]
    fn out_of_bounds_lookups_return_none() {
        let mut matrix = Matrix::from([[1, 2], [3, 4]]);

        assert_eq!(matrix.get(1, 1), Some(&4));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 2), None);
        assert!(matrix.get_mut(5, 5).is_none());
    }

    #[test]
    fn swap_two_rows() {
        let mut matrix = Matrix::from([[1, 2], [3, 4], [5, 6]]);

        matrix.swap_rows(0, 2);

        assert_eq!(matrix, [[5, 6], [3, 4], [1, 2]]);
    }

    #[test]
    fn rational_matrices_from_integers() {
        let got = Matrix::from_integers([[1, 0], [0, 1]]);

        assert_eq!(got, Matrix::identity(2));
        assert_eq!(Matrix::zeros(1, 3), [[Rational::ZERO; 3]]);
    }

    #[test]
    fn render_as_aligned_grid() {
        let matrix: Matrix = Matrix::from([
            [Rational::new(1, 2).unwrap(), Rational::from_integer(-10)],
            [Rational::from_integer(3), Rational::new(7, 4).unwrap()],
        ]);

        let fractions = matrix.render(Format::ImproperFraction);
        let decimals = matrix.render(Format::Decimal);

        assert_eq!(fractions, "1/2 -10\n  3 7/4\n");
        assert_eq!(decimals, "0.5  -10\n  3 1.75\n");
    }
}
