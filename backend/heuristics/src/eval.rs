//! Restricted arithmetic evaluator.
//!
//! Recursive descent over `+ - * / ( ) .` and numeric literals only. The
//! input originates from an external model response, so this deliberately
//! cannot evaluate anything but arithmetic.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("trailing input after expression")]
    TrailingInput,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,
}

/// Evaluate an arithmetic expression.
pub fn eval_arithmetic(expr: &str) -> Result<f64, EvalError> {
    let mut parser = Parser {
        chars: expr.chars().collect(),
        pos: 0,
    };
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(EvalError::Empty);
    }
    let value = parser.expression()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(EvalError::TrailingInput);
    }
    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    // factor := ('+' | '-') factor | '(' expression ')' | number
    fn factor(&mut self) -> Result<f64, EvalError> {
        self.skip_whitespace();
        match self.peek() {
            Some('+') => {
                self.pos += 1;
                self.factor()
            }
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                self.skip_whitespace();
                match self.bump() {
                    Some(')') => Ok(value),
                    Some(c) => Err(EvalError::UnexpectedChar(c)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(EvalError::UnexpectedChar(c)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    // number := digits ['.' digits] | '.' digits
    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse()
            .map_err(|_| EvalError::UnexpectedChar('.'))
    }
}

/// Approximate a real number as a fraction with the smallest denominator
/// within `tolerance`, via continued-fraction expansion.
pub fn approximate_fraction(value: f64, tolerance: f64, max_denominator: i64) -> Option<(i64, i64)> {
    if !value.is_finite() {
        return None;
    }
    let negative = value < 0.0;
    let target = value.abs();

    let mut x = target;
    // Convergent recurrence seeds: h_{-2}/k_{-2} = 0/1, h_{-1}/k_{-1} = 1/0.
    let (mut h_prev, mut h) = (0_i64, 1_i64);
    let (mut k_prev, mut k) = (1_i64, 0_i64);

    for _ in 0..64 {
        let a = x.floor();
        if a > i64::MAX as f64 {
            return None;
        }
        let a = a as i64;
        let h_next = a.checked_mul(h)?.checked_add(h_prev)?;
        let k_next = a.checked_mul(k)?.checked_add(k_prev)?;
        if k_next > max_denominator {
            break;
        }
        h_prev = h;
        h = h_next;
        k_prev = k;
        k = k_next;

        if (h as f64 / k as f64 - target).abs() <= tolerance {
            break;
        }
        let frac = x - x.floor();
        if frac < f64::EPSILON {
            break;
        }
        x = 1.0 / frac;
    }

    if k == 0 || (h as f64 / k as f64 - target).abs() > tolerance {
        return None;
    }
    Some((if negative { -h } else { h }, k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_precedence() {
        assert_eq!(eval_arithmetic("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval_arithmetic("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn evaluates_fraction_sum() {
        let value = eval_arithmetic("1/3 + 1/4").unwrap();
        assert!((value - 7.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(eval_arithmetic("-3 + 5").unwrap(), 2.0);
        assert_eq!(eval_arithmetic("2 * -3").unwrap(), -6.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(eval_arithmetic("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_arithmetic("1/(2-2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn rejects_juxtaposed_numbers() {
        assert_eq!(eval_arithmetic("3 4"), Err(EvalError::TrailingInput));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(eval_arithmetic("   "), Err(EvalError::Empty));
        assert!(eval_arithmetic("2 +").is_err());
        assert!(eval_arithmetic("()").is_err());
    }

    #[test]
    fn no_identifiers_ever() {
        assert_eq!(eval_arithmetic("abs(1)"), Err(EvalError::UnexpectedChar('a')));
    }

    #[test]
    fn fraction_of_seven_twelfths() {
        assert_eq!(
            approximate_fraction(7.0 / 12.0, 1e-9, 10_000),
            Some((7, 12))
        );
    }

    #[test]
    fn fraction_of_negative_half() {
        assert_eq!(approximate_fraction(-0.5, 1e-9, 10_000), Some((-1, 2)));
    }

    #[test]
    fn fraction_of_integer() {
        assert_eq!(approximate_fraction(4.0, 1e-9, 10_000), Some((4, 1)));
    }

    #[test]
    fn irrational_within_max_denominator_fails() {
        // No fraction with denominator <= 10 approximates pi to 1e-9.
        assert!(approximate_fraction(std::f64::consts::PI, 1e-9, 10).is_none());
    }
}
