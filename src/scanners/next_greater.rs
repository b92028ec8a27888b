//! # Next Greater Element
//!
//! Monotonic-stack lookups of the first strictly greater value to the right.
//!
//! - [`next_greater_distance`]: how many steps each position waits for a strictly
//!   greater value (0 when none follows), e.g. days until a warmer temperature.
//! - [`next_greater_values`]: for each query value, the first strictly greater value
//!   after it in a sequence of distinct values.
//!
//! ## Errors
//! - **InvalidColumn**: next_greater: the input names a column the series does not have.
//! - **DuplicateValue**: next_greater: the lookup sequence repeats a value.
//! - **UnknownQuery**: next_greater: a query value does not occur in the sequence.
//! - **InvalidKernel**: next_greater: a batch kernel was requested.

use crate::utilities::data_loader::{source_type, Series};
use crate::utilities::enums::Kernel;
use crate::utilities::helpers::detect_best_kernel;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum NextGreaterData<'a> {
	Series { series: &'a Series, column: &'a str },
	Slice(&'a [i64]),
}

#[derive(Debug, Clone)]
pub struct NextGreaterInput<'a> {
	pub data: NextGreaterData<'a>,
}

impl<'a> NextGreaterInput<'a> {
	/// Resolves the input values. A column missing from the series is an error.
	#[inline(always)]
	pub fn as_slice(&self) -> Result<&'a [i64], NextGreaterError> {
		match self.data {
			NextGreaterData::Slice(slice) => Ok(slice),
			NextGreaterData::Series { series, column } => {
				source_type(series, column).ok_or_else(|| NextGreaterError::InvalidColumn { column: column.to_string() })
			}
		}
	}
}

impl<'a> NextGreaterInput<'a> {
	#[inline]
	pub fn from_series(s: &'a Series, column: &'a str) -> Self {
		Self {
			data: NextGreaterData::Series { series: s, column },
		}
	}
	#[inline]
	pub fn from_slice(sl: &'a [i64]) -> Self {
		Self {
			data: NextGreaterData::Slice(sl),
		}
	}
	#[inline]
	pub fn with_default_series(s: &'a Series) -> Self {
		Self::from_series(s, "temps")
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextGreaterOutput {
	/// `distances[i]` is `j - i` for the smallest `j > i` with `data[j] > data[i]`, else 0.
	pub distances: Vec<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NextGreaterError {
	#[error("next_greater: Invalid column: {column}")]
	InvalidColumn { column: String },
	#[error("next_greater: Duplicate value {value} at index {index}")]
	DuplicateValue { value: i64, index: usize },
	#[error("next_greater: Query {value} does not occur in the sequence")]
	UnknownQuery { value: i64 },
	#[error("next_greater: Invalid kernel for single scan: {kernel}")]
	InvalidKernel { kernel: Kernel },
}

#[inline]
pub fn next_greater_distance(values: &[i64]) -> Vec<usize> {
	let mut out = vec![0; values.len()];
	next_greater_scalar(values, &mut out);
	out
}

#[inline]
pub fn next_greater(input: &NextGreaterInput) -> Result<NextGreaterOutput, NextGreaterError> {
	next_greater_with_kernel(input, Kernel::Auto)
}

pub fn next_greater_with_kernel(input: &NextGreaterInput, kernel: Kernel) -> Result<NextGreaterOutput, NextGreaterError> {
	let data = input.as_slice()?;
	let chosen = match kernel {
		Kernel::Auto => detect_best_kernel(),
		other => other,
	};
	let mut distances = vec![0; data.len()];
	match chosen {
		Kernel::Scalar => next_greater_scalar(data, &mut distances),
		Kernel::Naive => next_greater_naive(data, &mut distances),
		other => return Err(NextGreaterError::InvalidKernel { kernel: other }),
	}
	Ok(NextGreaterOutput { distances })
}

/// Decreasing index stack. `out` must be zeroed and as long as `data`.
#[inline]
pub fn next_greater_scalar(data: &[i64], out: &mut [usize]) {
	let mut stack: Vec<usize> = Vec::with_capacity(data.len());
	for (i, &v) in data.iter().enumerate() {
		while let Some(&top) = stack.last() {
			if v <= data[top] {
				break;
			}
			stack.pop();
			out[top] = i - top;
		}
		stack.push(i);
	}
}

#[inline]
pub fn next_greater_naive(data: &[i64], out: &mut [usize]) {
	for (i, slot) in out.iter_mut().enumerate() {
		*slot = data[i + 1..]
			.iter()
			.position(|&v| v > data[i])
			.map_or(0, |p| p + 1);
	}
}

/// For each query, the first value strictly greater than it that follows it in `values`.
pub fn next_greater_values(queries: &[i64], values: &[i64]) -> Result<Vec<Option<i64>>, NextGreaterError> {
	let mut next: HashMap<i64, Option<i64>> = HashMap::with_capacity(values.len());
	let mut stack: Vec<i64> = Vec::with_capacity(values.len());

	for (index, &x) in values.iter().enumerate() {
		match next.entry(x) {
			Entry::Occupied(_) => return Err(NextGreaterError::DuplicateValue { value: x, index }),
			Entry::Vacant(slot) => {
				slot.insert(None);
			}
		}
		while let Some(&top) = stack.last() {
			if x <= top {
				break;
			}
			stack.pop();
			next.insert(top, Some(x));
		}
		stack.push(x);
	}

	queries
		.iter()
		.map(|&q| next.get(&q).copied().ok_or(NextGreaterError::UnknownQuery { value: q }))
		.collect()
}
