//! # Reverse Polish Notation Evaluator
//!
//! Evaluates postfix expressions over `i64` with `+ - * /`. Division truncates toward
//! zero. Every arithmetic step is checked, so overflow and division by zero surface as
//! errors instead of panics.
//!
//! ## Errors
//! - **EmptyExpression**: rpn: no tokens.
//! - **InvalidToken**: rpn: a token is neither an operator nor an integer.
//! - **StackUnderflow**: rpn: an operator found fewer than two operands.
//! - **DivisionByZero**: rpn: right operand of `/` is zero.
//! - **Overflow**: rpn: an intermediate result does not fit in `i64`.
//! - **DanglingOperands**: rpn: more than one value left once all tokens are consumed.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	Add,
	Sub,
	Mul,
	Div,
}

impl Operator {
	#[inline]
	fn apply(self, a: i64, b: i64) -> Option<i64> {
		match self {
			Operator::Add => a.checked_add(b),
			Operator::Sub => a.checked_sub(b),
			Operator::Mul => a.checked_mul(b),
			Operator::Div => a.checked_div(b),
		}
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let c = match self {
			Operator::Add => '+',
			Operator::Sub => '-',
			Operator::Mul => '*',
			Operator::Div => '/',
		};
		write!(f, "{}", c)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
	Operand(i64),
	Op(Operator),
}

impl FromStr for Token {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"+" => Ok(Token::Op(Operator::Add)),
			"-" => Ok(Token::Op(Operator::Sub)),
			"*" => Ok(Token::Op(Operator::Mul)),
			"/" => Ok(Token::Op(Operator::Div)),
			other => other.parse::<i64>().map(Token::Operand).map_err(|_| ()),
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RpnError {
	#[error("rpn: Empty expression")]
	EmptyExpression,
	#[error("rpn: Invalid token {token:?} at position {position}")]
	InvalidToken { position: usize, token: String },
	#[error("rpn: Operator {op} at position {position} needs two operands")]
	StackUnderflow { position: usize, op: Operator },
	#[error("rpn: Division by zero at position {position}")]
	DivisionByZero { position: usize },
	#[error("rpn: Overflow evaluating {a} {op} {b} at position {position}")]
	Overflow { position: usize, a: i64, op: Operator, b: i64 },
	#[error("rpn: Expression leaves {remaining} values on the stack")]
	DanglingOperands { remaining: usize },
}

/// Evaluates `tokens` left to right.
pub fn eval_rpn<S: AsRef<str>>(tokens: &[S]) -> Result<i64, RpnError> {
	if tokens.is_empty() {
		return Err(RpnError::EmptyExpression);
	}
	let mut stack: Vec<i64> = Vec::with_capacity(tokens.len() / 2 + 1);

	for (position, raw) in tokens.iter().enumerate() {
		let raw = raw.as_ref();
		let token = raw.parse::<Token>().map_err(|_| RpnError::InvalidToken {
			position,
			token: raw.to_string(),
		})?;
		match token {
			Token::Operand(v) => stack.push(v),
			Token::Op(op) => {
				let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
					return Err(RpnError::StackUnderflow { position, op });
				};
				if op == Operator::Div && b == 0 {
					return Err(RpnError::DivisionByZero { position });
				}
				let c = op.apply(a, b).ok_or(RpnError::Overflow { position, a, op, b })?;
				stack.push(c);
			}
		}
	}

	match stack.as_slice() {
		[value] => Ok(*value),
		rest => Err(RpnError::DanglingOperands { remaining: rest.len() }),
	}
}

/// Splits `expr` on whitespace and evaluates it.
pub fn eval_rpn_str(expr: &str) -> Result<i64, RpnError> {
	let tokens: Vec<&str> = expr.split_whitespace().collect();
	eval_rpn(tokens.as_slice())
}
