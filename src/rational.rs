//! Exact fractions with a fixed-width numerator and denominator.
//!
//! A [`Rational`] is always kept in lowest terms, with the sign stored
//! separately from the magnitude. Zero has exactly one representation
//! (`+0/1`), which means structural equality is the same as numeric equality.

use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    num::IntErrorKind,
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};
use thiserror::Error;

/// Decimal conversions keep scaling by 10 until the value is a whole number
/// or the denominator reaches this limit.
pub const ACCURACY_LIMIT: u64 = 100_000_000;

/// The number of fractional digits kept when reading or writing decimals
/// (`log10(ACCURACY_LIMIT)`).
const DECIMAL_PLACES: usize = 8;

/// How a [`Rational`] should be printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    /// `n/d`, or just `n` when the denominator is 1.
    ImproperFraction,
    /// A decimal number, truncated to 8 fractional digits.
    ///
    /// This is lossy. Only values whose expansion terminates within 8 digits
    /// (e.g. `3/8`) parse back to the same fraction, so `1/3` comes back as
    /// `33333333/100000000`.
    Decimal,
}

impl Default for Format {
    fn default() -> Self { Format::ImproperFraction }
}

impl FromStr for Format {
    type Err = RationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fraction" | "improper" | "improper-fraction" => {
                Ok(Format::ImproperFraction)
            },
            "decimal" => Ok(Format::Decimal),
            _ => Err(RationalError::InvalidFormat),
        }
    }
}

/// Things that can go wrong when creating or manipulating a [`Rational`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum RationalError {
    #[error("The denominator of a fraction can't be zero")]
    DenominatorZero,
    #[error("The text isn't a valid fraction or decimal number")]
    InvalidFormat,
    #[error("Index {index} is out of bounds, expected 0 or 1")]
    IndexOutOfBounds { index: usize },
    #[error("Expected a non-negative step, found {value}")]
    NegativeParameter { value: i64 },
    #[error("The result doesn't fit in a fixed-width fraction")]
    Overflow,
}

/// An exact fraction in lowest terms.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    negative: bool,
    numerator: u64,
    denominator: u64,
}

impl Rational {
    pub const ONE: Rational = Rational {
        negative: false,
        numerator: 1,
        denominator: 1,
    };
    pub const ZERO: Rational = Rational {
        negative: false,
        numerator: 0,
        denominator: 1,
    };

    /// Create the fraction `numerator/denominator`, reduced to lowest terms.
    pub fn new(
        numerator: i64,
        denominator: i64,
    ) -> Result<Self, RationalError> {
        if denominator == 0 {
            return Err(RationalError::DenominatorZero);
        }

        Ok(reduce(
            (numerator < 0) != (denominator < 0),
            numerator.unsigned_abs(),
            denominator.unsigned_abs(),
        ))
    }

    pub fn from_integer(value: i64) -> Self {
        Rational {
            negative: value < 0,
            numerator: value.unsigned_abs(),
            denominator: 1,
        }
    }

    /// Approximate a floating point number.
    ///
    /// The value is scaled by 10 until it is a whole number or the
    /// denominator reaches [`ACCURACY_LIMIT`], then the integral part of the
    /// scaled value becomes the numerator. The bound is on the denominator,
    /// not on the scaled magnitude, so large values still keep up to 8
    /// fractional digits (`123456789.5` is exactly `246913579/2`).
    pub fn from_f64(value: f64) -> Result<Self, RationalError> {
        if !value.is_finite() {
            return Err(RationalError::InvalidFormat);
        }

        let mut scaled = value.abs();
        let mut denominator = 1_u64;

        while scaled.fract() != 0.0 && denominator < ACCURACY_LIMIT {
            scaled *= 10.0;
            denominator *= 10;
        }

        if scaled >= u64::MAX as f64 {
            return Err(RationalError::Overflow);
        }

        Ok(reduce(value < 0.0, scaled.trunc() as u64, denominator))
    }

    /// Build a fraction from wide intermediate values, failing if the reduced
    /// result doesn't fit.
    fn from_parts(
        negative: bool,
        numerator: u128,
        denominator: u128,
    ) -> Result<Self, RationalError> {
        if denominator == 0 {
            return Err(RationalError::DenominatorZero);
        }
        if numerator == 0 {
            return Ok(Rational::ZERO);
        }

        let divisor = gcd(numerator, denominator);
        let numerator = u64::try_from(numerator / divisor)
            .map_err(|_| RationalError::Overflow)?;
        let denominator = u64::try_from(denominator / divisor)
            .map_err(|_| RationalError::Overflow)?;

        Ok(Rational {
            negative,
            numerator,
            denominator,
        })
    }

    pub fn numerator(self) -> u64 { self.numerator }

    pub fn denominator(self) -> u64 { self.denominator }

    pub fn is_negative(self) -> bool { self.negative }

    pub fn is_zero(self) -> bool { self.numerator == 0 }

    pub fn abs(self) -> Self {
        Rational {
            negative: false,
            ..self
        }
    }

    /// Indexed access: `0` gives the signed numerator, `1` the denominator.
    pub fn component(self, index: usize) -> Result<i128, RationalError> {
        match index {
            0 if self.negative => Ok(-i128::from(self.numerator)),
            0 => Ok(i128::from(self.numerator)),
            1 => Ok(i128::from(self.denominator)),
            _ => Err(RationalError::IndexOutOfBounds { index }),
        }
    }

    /// Replace the numerator (and with it, the sign).
    pub fn set_numerator(&mut self, numerator: i64) {
        *self =
            reduce(numerator < 0, numerator.unsigned_abs(), self.denominator);
    }

    /// Replace the denominator. A negative denominator flips the sign.
    pub fn set_denominator(
        &mut self,
        denominator: i64,
    ) -> Result<(), RationalError> {
        if denominator == 0 {
            return Err(RationalError::DenominatorZero);
        }

        let negative = self.negative != (denominator < 0);
        *self = reduce(negative, self.numerator, denominator.unsigned_abs());
        Ok(())
    }

    /// Add `step` to this fraction in place, where a step of `0` counts as
    /// `1`. The value is left untouched on failure.
    pub fn increment(&mut self, step: i64) -> Result<(), RationalError> {
        let step = checked_step(step)?;
        *self = self.checked_add(step)?;
        Ok(())
    }

    /// Subtract `step` from this fraction in place, where a step of `0`
    /// counts as `1`. The value is left untouched on failure.
    pub fn decrement(&mut self, step: i64) -> Result<(), RationalError> {
        let step = checked_step(step)?;
        *self = self.checked_sub(step)?;
        Ok(())
    }

    pub fn checked_add(self, rhs: Rational) -> Result<Rational, RationalError> {
        let left = u128::from(self.numerator) * u128::from(rhs.denominator);
        let right = u128::from(rhs.numerator) * u128::from(self.denominator);
        let denominator =
            u128::from(self.denominator) * u128::from(rhs.denominator);

        if self.negative == rhs.negative {
            let numerator =
                left.checked_add(right).ok_or(RationalError::Overflow)?;
            Rational::from_parts(self.negative, numerator, denominator)
        } else if left >= right {
            Rational::from_parts(self.negative, left - right, denominator)
        } else {
            Rational::from_parts(rhs.negative, right - left, denominator)
        }
    }

    pub fn checked_sub(self, rhs: Rational) -> Result<Rational, RationalError> {
        self.checked_add(-rhs)
    }

    pub fn checked_mul(self, rhs: Rational) -> Result<Rational, RationalError> {
        Rational::from_parts(
            self.negative != rhs.negative,
            u128::from(self.numerator) * u128::from(rhs.numerator),
            u128::from(self.denominator) * u128::from(rhs.denominator),
        )
    }

    /// Divide by another fraction. The quotient is positive when both
    /// operands share a sign, and a zero quotient is always positive.
    pub fn checked_div(self, rhs: Rational) -> Result<Rational, RationalError> {
        Rational::from_parts(
            self.negative != rhs.negative,
            u128::from(self.numerator) * u128::from(rhs.denominator),
            u128::from(self.denominator) * u128::from(rhs.numerator),
        )
    }

    /// A lossy conversion, mostly useful for comparing against floating point
    /// libraries.
    pub fn to_f64(self) -> f64 {
        let magnitude = self.numerator as f64 / self.denominator as f64;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Get something which prints this fraction using a particular
    /// [`Format`].
    pub fn display(self, format: Format) -> impl Display {
        Formatted {
            value: self,
            format,
        }
    }

    fn write_decimal(self, f: &mut Formatter<'_>) -> fmt::Result {
        let whole = self.numerator / self.denominator;
        let mut remainder = u128::from(self.numerator % self.denominator);
        let denominator = u128::from(self.denominator);
        let mut digits = String::with_capacity(DECIMAL_PLACES);

        while remainder != 0 && digits.len() < DECIMAL_PLACES {
            remainder *= 10;
            let digit = (remainder / denominator) as u8;
            digits.push(char::from(b'0' + digit));
            remainder %= denominator;
        }

        let digits = digits.trim_end_matches('0');

        if self.negative && (whole != 0 || !digits.is_empty()) {
            write!(f, "-")?;
        }
        write!(f, "{}", whole)?;
        if !digits.is_empty() {
            write!(f, ".{}", digits)?;
        }

        Ok(())
    }
}

/// Euclid's algorithm.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }

    a
}

/// Reduce a fraction whose parts are already known to fit.
fn reduce(negative: bool, numerator: u64, denominator: u64) -> Rational {
    debug_assert_ne!(denominator, 0);

    if numerator == 0 {
        return Rational::ZERO;
    }

    let divisor = gcd(u128::from(numerator), u128::from(denominator)) as u64;

    Rational {
        negative,
        numerator: numerator / divisor,
        denominator: denominator / divisor,
    }
}

fn checked_step(step: i64) -> Result<Rational, RationalError> {
    match step {
        s if s < 0 => Err(RationalError::NegativeParameter { value: s }),
        0 => Ok(Rational::ONE),
        s => Ok(Rational::from_integer(s)),
    }
}

fn parse_integer(text: &str) -> Result<i64, RationalError> {
    text.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            RationalError::Overflow
        },
        _ => RationalError::InvalidFormat,
    })
}

/// Read a decimal exactly, keeping at most [`DECIMAL_PLACES`] fractional
/// digits.
fn parse_decimal(text: &str) -> Result<Rational, RationalError> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = unsigned
        .split_once('.')
        .ok_or(RationalError::InvalidFormat)?;

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !all_digits(whole)
        || !all_digits(fraction)
    {
        return Err(RationalError::InvalidFormat);
    }

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| RationalError::Overflow)?
    };

    let fraction = &fraction[..fraction.len().min(DECIMAL_PLACES)];
    let mut denominator = 1_u128;
    let mut numerator = whole;

    for digit in fraction.bytes() {
        denominator *= 10;
        numerator = numerator
            .checked_mul(10)
            .and_then(|n| n.checked_add(u128::from(digit - b'0')))
            .ok_or(RationalError::Overflow)?;
    }

    Rational::from_parts(negative, numerator, denominator)
}

impl Default for Rational {
    fn default() -> Self { Rational::ZERO }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self { Rational::from_integer(value) }
}

impl FromStr for Rational {
    type Err = RationalError;

    /// Parse `"5"`, `"-5/6"` or `"3.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        let valid_characters = text
            .chars()
            .all(|c| matches!(c, '0'..='9' | '-' | '.' | '/'));
        if text.is_empty() || !valid_characters {
            return Err(RationalError::InvalidFormat);
        }

        match (text.matches('.').count(), text.matches('/').count()) {
            (0, 0) => parse_integer(text).map(Rational::from_integer),
            (0, 1) => {
                let (numerator, denominator) =
                    text.split_once('/').ok_or(RationalError::InvalidFormat)?;
                Rational::new(
                    parse_integer(numerator)?,
                    parse_integer(denominator)?,
                )
            },
            (1, 0) => parse_decimal(text),
            _ => Err(RationalError::InvalidFormat),
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    /// Compare by cross-multiplication.
    fn cmp(&self, other: &Rational) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let left =
                    u128::from(self.numerator) * u128::from(other.denominator);
                let right =
                    u128::from(other.numerator) * u128::from(self.denominator);

                if negative {
                    right.cmp(&left)
                } else {
                    left.cmp(&right)
                }
            },
        }
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        if self.is_zero() {
            self
        } else {
            Rational {
                negative: !self.negative,
                ..self
            }
        }
    }
}

// The operator overloads panic on overflow, just like the primitive integer
// types. Use the `checked_*()` methods when failure needs to be handled.

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        self.checked_add(rhs).unwrap_or_else(|e| {
            panic!("Unable to add {} and {}: {}", self, rhs, e)
        })
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self.checked_sub(rhs).unwrap_or_else(|e| {
            panic!("Unable to subtract {} from {}: {}", rhs, self, e)
        })
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        self.checked_mul(rhs).unwrap_or_else(|e| {
            panic!("Unable to multiply {} by {}: {}", self, rhs, e)
        })
    }
}

impl Div for Rational {
    type Output = Rational;

    fn div(self, rhs: Rational) -> Rational {
        self.checked_div(rhs).unwrap_or_else(|e| {
            panic!("Unable to divide {} by {}: {}", self, rhs, e)
        })
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.numerator)?;
        if self.denominator != 1 {
            write!(f, "/{}", self.denominator)?;
        }

        Ok(())
    }
}

impl Debug for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Formatted {
    value: Rational,
    format: Format,
}

impl Display for Formatted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.format {
            Format::ImproperFraction => Display::fmt(&self.value, f),
            Format::Decimal => self.value.write_decimal(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(numerator: i64, denominator: i64) -> Rational {
        Rational::new(numerator, denominator).unwrap()
    }

    #[test]
    fn fractions_are_always_reduced() {
        let inputs = vec![
            ((4, 8), (false, 1, 2)),
            ((6, 3), (false, 2, 1)),
            ((8, 6), (false, 4, 3)),
            ((-10, 4), (true, 5, 2)),
            ((10, -4), (true, 5, 2)),
            ((-10, -4), (false, 5, 2)),
            ((0, -7), (false, 0, 1)),
            ((13, 17), (false, 13, 17)),
        ];

        for ((numerator, denominator), (negative, n, d)) in inputs {
            let got = frac(numerator, denominator);

            let case = format!("{}/{}", numerator, denominator);
            assert_eq!(got.is_negative(), negative, "{}", case);
            assert_eq!(got.numerator(), n, "{}", case);
            assert_eq!(got.denominator(), d, "{}", case);
        }
    }

    #[test]
    fn reduction_matches_dividing_by_the_gcd() {
        for numerator in -12_i64..=12 {
            for denominator in 1_i64..=12 {
                let divisor =
                    gcd(numerator.unsigned_abs() as u128, denominator as u128)
                        as i64;
                let divisor = divisor.max(1);

                assert_eq!(
                    frac(numerator, denominator),
                    frac(numerator / divisor, denominator / divisor)
                );
            }
        }
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(Rational::new(1, 0), Err(RationalError::DenominatorZero));
        assert_eq!(
            "3/0".parse::<Rational>(),
            Err(RationalError::DenominatorZero)
        );
        assert_eq!(
            Rational::ONE.checked_div(Rational::ZERO),
            Err(RationalError::DenominatorZero)
        );
    }

    #[test]
    fn arithmetic() {
        assert_eq!(frac(1, 2) + frac(1, 3), frac(5, 6));
        assert_eq!(frac(1, 2) - frac(3, 4), frac(-1, 4));
        assert_eq!(frac(-2, 3) * frac(3, 4), frac(-1, 2));
        assert_eq!(frac(-2, 3) / frac(-4, 9), frac(3, 2));
        assert_eq!(frac(2, 3) / frac(-4, 9), frac(-3, 2));
        assert_eq!(frac(1, 2) - frac(1, 2), Rational::ZERO);
        assert_eq!(-Rational::ZERO, Rational::ZERO);
        assert_eq!(-frac(1, 2), frac(-1, 2));
    }

    #[test]
    fn zero_quotients_are_positive() {
        let got = frac(0, 1) / frac(-5, 7);

        assert_eq!(got, Rational::ZERO);
        assert!(!got.is_negative());
    }

    #[test]
    fn ordering_is_consistent_with_value() {
        assert!(frac(1, 2) < frac(2, 3));
        assert!(frac(-2, 3) < frac(-1, 2));
        assert!(frac(-1, 100) < Rational::ZERO);
        assert!(frac(7, 3) >= frac(14, 6));
        assert!(frac(7, 3) <= frac(14, 6));
        assert!(frac(5, 1) > frac(49, 10));
        assert_ne!(frac(1, 3), frac(1, 2));

        let mut values = vec![frac(3, 4), frac(-1, 2), frac(0, 1), frac(1, 8)];
        values.sort();
        assert_eq!(
            values,
            vec![frac(-1, 2), frac(0, 1), frac(1, 8), frac(3, 4)]
        );
    }

    #[test]
    fn parse_valid_strings() {
        let inputs = vec![
            ("5", frac(5, 1)),
            ("-5", frac(-5, 1)),
            ("5/6", frac(5, 6)),
            ("-10/4", frac(-5, 2)),
            ("3/-4", frac(-3, 4)),
            ("3.5", frac(7, 2)),
            ("-0.25", frac(-1, 4)),
            (".5", frac(1, 2)),
            ("5.", frac(5, 1)),
            (" 2/4 ", frac(1, 2)),
            ("0.123456789", frac(12_345_678, 100_000_000)),
        ];

        for (src, should_be) in inputs {
            let got: Rational = src.parse().unwrap();
            assert_eq!(got, should_be, "{:?}", src);
        }
    }

    #[test]
    fn parse_invalid_strings() {
        let inputs = vec![
            "", "abc", "3.4.5", "1/2/3", "3.4/5.6", "-", ".", "1-2", "2e5",
        ];

        for src in inputs {
            assert_eq!(
                src.parse::<Rational>(),
                Err(RationalError::InvalidFormat),
                "{:?}",
                src
            );
        }
    }

    #[test]
    fn print_in_both_formats() {
        let inputs = vec![
            (frac(5, 6), "5/6", "0.83333333"),
            (frac(-7, 2), "-7/2", "-3.5"),
            (frac(4, 1), "4", "4"),
            (Rational::ZERO, "0", "0"),
            (frac(-1, 1_000_000_000), "-1/1000000000", "0"),
            (frac(1, 8), "1/8", "0.125"),
        ];

        for (value, fraction, decimal) in inputs {
            let improper = value.display(Format::ImproperFraction);
            assert_eq!(improper.to_string(), fraction);
            assert_eq!(value.to_string(), fraction);
            assert_eq!(value.display(Format::Decimal).to_string(), decimal);
        }
    }

    #[test]
    fn printed_form_parses_back_to_the_same_value() {
        let values = vec![
            frac(5, 6),
            frac(-7, 2),
            frac(12, 1),
            frac(-3, 8),
            Rational::ZERO,
            frac(1, 1024),
        ];

        for value in values {
            let fraction = value.to_string();
            assert_eq!(fraction.parse::<Rational>().unwrap(), value);
        }

        // decimals only round trip when the expansion terminates in time
        for value in vec![frac(-7, 2), frac(3, 8), frac(1, 64), frac(9, 1)] {
            let decimal = value.display(Format::Decimal).to_string();
            let got: Rational = decimal.parse().unwrap();
            assert_eq!(got, value, "{}", decimal);
        }
    }

    #[test]
    fn non_terminating_decimals_are_truncated() {
        let third = frac(1, 3);

        let decimal = third.display(Format::Decimal).to_string();
        let got: Rational = decimal.parse().unwrap();

        assert_eq!(decimal, "0.33333333");
        assert_eq!(got, frac(33_333_333, 100_000_000));
        assert_ne!(got, third);
    }

    #[test]
    fn absolute_value() {
        assert_eq!(frac(-3, 4).abs(), frac(3, 4));
        assert_eq!(frac(3, 4).abs(), frac(3, 4));
        assert_eq!(Rational::ZERO.abs(), Rational::ZERO);
    }

    #[test]
    fn convert_from_floating_point() {
        let inputs = vec![
            (0.5, frac(1, 2)),
            (-2.125, frac(-17, 8)),
            (1.75, frac(7, 4)),
            (3.0, frac(3, 1)),
            (0.0, Rational::ZERO),
        ];

        for (value, should_be) in inputs {
            let got = Rational::from_f64(value).unwrap();
            assert_eq!(got, should_be, "{}", value);
            approx::assert_relative_eq!(got.to_f64(), value);
        }

        assert_eq!(
            Rational::from_f64(f64::NAN),
            Err(RationalError::InvalidFormat)
        );
        assert_eq!(Rational::from_f64(1e30), Err(RationalError::Overflow));

        // the digit limit applies to the denominator, not the magnitude
        assert_eq!(
            Rational::from_f64(123_456_789.5),
            Ok(frac(246_913_579, 2))
        );
    }

    #[test]
    fn indexed_access() {
        let value = frac(-3, 4);

        assert_eq!(value.component(0), Ok(-3));
        assert_eq!(value.component(1), Ok(4));
        assert_eq!(
            value.component(2),
            Err(RationalError::IndexOutOfBounds { index: 2 })
        );
    }

    #[test]
    fn increment_and_decrement() {
        let mut value = frac(1, 2);

        value.increment(0).unwrap();
        assert_eq!(value, frac(3, 2));
        value.decrement(2).unwrap();
        assert_eq!(value, frac(-1, 2));
        value.decrement(0).unwrap();
        assert_eq!(value, frac(-3, 2));
        value.increment(3).unwrap();
        assert_eq!(value, frac(3, 2));

        assert_eq!(
            value.increment(-1),
            Err(RationalError::NegativeParameter { value: -1 })
        );
        assert_eq!(
            value.decrement(-4),
            Err(RationalError::NegativeParameter { value: -4 })
        );
        assert_eq!(value, frac(3, 2), "Failures leave the value untouched");
    }

    #[test]
    fn mutators_keep_the_fraction_reduced() {
        let mut value = frac(2, 3);

        value.set_numerator(-6);
        assert_eq!(value, frac(-2, 1));

        let mut value = frac(2, 3);
        value.set_denominator(-4).unwrap();
        assert_eq!(value, frac(-1, 2));

        assert_eq!(
            value.set_denominator(0),
            Err(RationalError::DenominatorZero)
        );
        assert_eq!(value, frac(-1, 2));
    }

    #[test]
    fn overflow_is_reported_instead_of_wrapping() {
        let huge = Rational::from_integer(i64::MAX);
        let tiny = Rational::new(1, i64::MAX).unwrap();

        assert_eq!(
            huge.checked_mul(huge).and_then(|v| v.checked_mul(huge)),
            Err(RationalError::Overflow)
        );
        assert_eq!(tiny.checked_mul(tiny), Err(RationalError::Overflow));
        assert_eq!(
            "99999999999999999999".parse::<Rational>(),
            Err(RationalError::Overflow)
        );
    }

    #[test]
    fn parse_output_format() {
        assert_eq!("decimal".parse::<Format>(), Ok(Format::Decimal));
        assert_eq!("Fraction".parse::<Format>(), Ok(Format::ImproperFraction));
        assert!("binary".parse::<Format>().is_err());
    }
}
