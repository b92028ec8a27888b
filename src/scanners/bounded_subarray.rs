//! # Longest Bounded Subarray
//!
//! Longest contiguous run whose spread (`max - min`) stays within `limit`.
//! Two monotonic deques track the running maximum and minimum of the window; the
//! left edge advances until the spread fits again, expiring stale fronts.
//!
//! ## Parameters
//! - **limit**: Largest allowed spread (default: 0, i.e. runs of equal values).
//!
//! ## Errors
//! - **InvalidColumn**: bounded_subarray: the input names a column the series does not have.
//! - **InvalidLimit**: bounded_subarray: `limit` is negative.
//! - **InvalidKernel**: bounded_subarray: a batch kernel was requested.

use crate::utilities::data_loader::{source_type, Series};
use crate::utilities::enums::Kernel;
use crate::utilities::helpers::detect_best_kernel;
use crate::utilities::mono_deque::MonoDeque;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum BoundedSubarrayData<'a> {
	Series { series: &'a Series, column: &'a str },
	Slice(&'a [i64]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedSubarrayParams {
	pub limit: Option<i64>,
}

impl Default for BoundedSubarrayParams {
	fn default() -> Self {
		Self { limit: Some(0) }
	}
}

#[derive(Debug, Clone)]
pub struct BoundedSubarrayInput<'a> {
	pub data: BoundedSubarrayData<'a>,
	pub params: BoundedSubarrayParams,
}

impl<'a> BoundedSubarrayInput<'a> {
	/// Resolves the input values. A column missing from the series is an error.
	#[inline(always)]
	pub fn as_slice(&self) -> Result<&'a [i64], BoundedSubarrayError> {
		match self.data {
			BoundedSubarrayData::Slice(slice) => Ok(slice),
			BoundedSubarrayData::Series { series, column } => {
				source_type(series, column).ok_or_else(|| BoundedSubarrayError::InvalidColumn { column: column.to_string() })
			}
		}
	}
}

impl<'a> BoundedSubarrayInput<'a> {
	#[inline]
	pub fn from_series(s: &'a Series, column: &'a str, p: BoundedSubarrayParams) -> Self {
		Self {
			data: BoundedSubarrayData::Series { series: s, column },
			params: p,
		}
	}
	#[inline]
	pub fn from_slice(sl: &'a [i64], p: BoundedSubarrayParams) -> Self {
		Self {
			data: BoundedSubarrayData::Slice(sl),
			params: p,
		}
	}
	#[inline]
	pub fn get_limit(&self) -> i64 {
		self.params.limit.unwrap_or(0)
	}
}

/// `start` is the first index of the earliest longest run, `None` for empty input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoundedSubarrayOutput {
	pub length: usize,
	pub start: Option<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundedSubarrayError {
	#[error("bounded_subarray: Invalid column: {column}")]
	InvalidColumn { column: String },
	#[error("bounded_subarray: Invalid limit: {limit} (must be non-negative)")]
	InvalidLimit { limit: i64 },
	#[error("bounded_subarray: Invalid kernel for single scan: {kernel}")]
	InvalidKernel { kernel: Kernel },
}

#[inline]
pub fn longest_bounded_subarray(nums: &[i64], limit: i64) -> Result<usize, BoundedSubarrayError> {
	let input = BoundedSubarrayInput::from_slice(nums, BoundedSubarrayParams { limit: Some(limit) });
	bounded_subarray(&input).map(|o| o.length)
}

#[inline]
pub fn bounded_subarray(input: &BoundedSubarrayInput) -> Result<BoundedSubarrayOutput, BoundedSubarrayError> {
	bounded_subarray_with_kernel(input, Kernel::Auto)
}

pub fn bounded_subarray_with_kernel(
	input: &BoundedSubarrayInput,
	kernel: Kernel,
) -> Result<BoundedSubarrayOutput, BoundedSubarrayError> {
	let data = input.as_slice()?;
	let limit = input.get_limit();
	if limit < 0 {
		return Err(BoundedSubarrayError::InvalidLimit { limit });
	}

	let chosen = match kernel {
		Kernel::Auto => detect_best_kernel(),
		other => other,
	};
	match chosen {
		Kernel::Scalar => Ok(bounded_subarray_scalar(data, limit)),
		Kernel::Naive => Ok(bounded_subarray_naive(data, limit)),
		other => Err(BoundedSubarrayError::InvalidKernel { kernel: other }),
	}
}

#[inline(always)]
fn spread(hi: i64, lo: i64) -> i128 {
	hi as i128 - lo as i128
}

pub fn bounded_subarray_scalar(data: &[i64], limit: i64) -> BoundedSubarrayOutput {
	let limit = limit as i128;
	let mut highs = MonoDeque::with_capacity(data.len());
	let mut lows = MonoDeque::with_capacity(data.len());
	let mut left = 0usize;
	let mut best = BoundedSubarrayOutput::default();

	for right in 0..data.len() {
		highs.push_max(right, data);
		lows.push_min(right, data);
		while let (Some(hi), Some(lo)) = (highs.front(), lows.front()) {
			if spread(data[hi], data[lo]) <= limit {
				break;
			}
			left += 1;
			highs.expire(left);
			lows.expire(left);
		}
		let len = right + 1 - left;
		if len > best.length {
			best = BoundedSubarrayOutput {
				length: len,
				start: Some(left),
			};
		}
	}
	best
}

pub fn bounded_subarray_naive(data: &[i64], limit: i64) -> BoundedSubarrayOutput {
	let limit = limit as i128;
	let mut best = BoundedSubarrayOutput::default();
	for start in 0..data.len() {
		let (mut hi, mut lo) = (data[start], data[start]);
		let mut len = 0;
		for &v in &data[start..] {
			hi = hi.max(v);
			lo = lo.min(v);
			if spread(hi, lo) > limit {
				break;
			}
			len += 1;
		}
		if len > best.length {
			best = BoundedSubarrayOutput {
				length: len,
				start: Some(start),
			};
		}
	}
	best
}
