//! # Shortest Subarray With Sum At Least Target
//!
//! Length of the shortest non-empty contiguous run whose sum reaches `target`.
//! Works on prefix sums with a deque of prefix indices kept increasing in prefix
//! value: a front index is retired as soon as it yields a qualifying run, and a back
//! index is dropped once a later prefix is no larger. Negative values are allowed.
//!
//! ## Parameters
//! - **target**: Required sum, must be positive.
//!
//! ## Errors
//! - **InvalidColumn**: shortest_subarray: the input names a column the series does not have.
//! - **InvalidTarget**: shortest_subarray: `target` is zero or negative.
//! - **InvalidKernel**: shortest_subarray: a batch kernel was requested.
//!
//! ## Returns
//! - **`Ok(ShortestSubarrayOutput)`** with `length: None` when no run qualifies
//!   (including empty input).

use crate::utilities::data_loader::{source_type, Series};
use crate::utilities::enums::Kernel;
use crate::utilities::helpers::detect_best_kernel;
use crate::utilities::mono_deque::MonoDeque;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum ShortestSubarrayData<'a> {
	Series { series: &'a Series, column: &'a str },
	Slice(&'a [i64]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestSubarrayParams {
	pub target: i64,
}

#[derive(Debug, Clone)]
pub struct ShortestSubarrayInput<'a> {
	pub data: ShortestSubarrayData<'a>,
	pub params: ShortestSubarrayParams,
}

impl<'a> ShortestSubarrayInput<'a> {
	/// Resolves the input values. A column missing from the series is an error.
	#[inline(always)]
	pub fn as_slice(&self) -> Result<&'a [i64], ShortestSubarrayError> {
		match self.data {
			ShortestSubarrayData::Slice(slice) => Ok(slice),
			ShortestSubarrayData::Series { series, column } => {
				source_type(series, column).ok_or_else(|| ShortestSubarrayError::InvalidColumn { column: column.to_string() })
			}
		}
	}
}

impl<'a> ShortestSubarrayInput<'a> {
	#[inline]
	pub fn from_series(s: &'a Series, column: &'a str, p: ShortestSubarrayParams) -> Self {
		Self {
			data: ShortestSubarrayData::Series { series: s, column },
			params: p,
		}
	}
	#[inline]
	pub fn from_slice(sl: &'a [i64], p: ShortestSubarrayParams) -> Self {
		Self {
			data: ShortestSubarrayData::Slice(sl),
			params: p,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortestSubarrayOutput {
	pub length: Option<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortestSubarrayError {
	#[error("shortest_subarray: Invalid column: {column}")]
	InvalidColumn { column: String },
	#[error("shortest_subarray: Invalid target: {target} (must be positive)")]
	InvalidTarget { target: i64 },
	#[error("shortest_subarray: Invalid kernel for single scan: {kernel}")]
	InvalidKernel { kernel: Kernel },
}

#[inline]
pub fn shortest_subarray_at_least(nums: &[i64], target: i64) -> Result<Option<usize>, ShortestSubarrayError> {
	let input = ShortestSubarrayInput::from_slice(nums, ShortestSubarrayParams { target });
	shortest_subarray(&input).map(|o| o.length)
}

#[inline]
pub fn shortest_subarray(input: &ShortestSubarrayInput) -> Result<ShortestSubarrayOutput, ShortestSubarrayError> {
	shortest_subarray_with_kernel(input, Kernel::Auto)
}

pub fn shortest_subarray_with_kernel(
	input: &ShortestSubarrayInput,
	kernel: Kernel,
) -> Result<ShortestSubarrayOutput, ShortestSubarrayError> {
	let data = input.as_slice()?;
	let target = input.params.target;
	if target <= 0 {
		return Err(ShortestSubarrayError::InvalidTarget { target });
	}

	let chosen = match kernel {
		Kernel::Auto => detect_best_kernel(),
		other => other,
	};
	let length = match chosen {
		Kernel::Scalar => shortest_subarray_scalar(data, target),
		Kernel::Naive => shortest_subarray_naive(data, target),
		other => return Err(ShortestSubarrayError::InvalidKernel { kernel: other }),
	};
	Ok(ShortestSubarrayOutput { length })
}

#[inline]
fn prefix_sums(data: &[i64]) -> Vec<i128> {
	let mut prefix = Vec::with_capacity(data.len() + 1);
	let mut acc: i128 = 0;
	prefix.push(acc);
	for &v in data {
		acc += v as i128;
		prefix.push(acc);
	}
	prefix
}

pub fn shortest_subarray_scalar(data: &[i64], target: i64) -> Option<usize> {
	let prefix = prefix_sums(data);
	let target = target as i128;
	let mut dq = MonoDeque::with_capacity(prefix.len());
	let mut best: Option<usize> = None;

	for i in 0..prefix.len() {
		while let Some(front) = dq.front() {
			if prefix[i] - prefix[front] < target {
				break;
			}
			let len = i - front;
			best = Some(best.map_or(len, |b| b.min(len)));
			dq.pop_front();
		}
		dq.push_min(i, &prefix);
	}
	best
}

pub fn shortest_subarray_naive(data: &[i64], target: i64) -> Option<usize> {
	let target = target as i128;
	let mut best: Option<usize> = None;
	for start in 0..data.len() {
		let mut sum: i128 = 0;
		for (offset, &v) in data[start..].iter().enumerate() {
			sum += v as i128;
			if sum >= target {
				let len = offset + 1;
				best = Some(best.map_or(len, |b| b.min(len)));
				break;
			}
		}
	}
	best
}
