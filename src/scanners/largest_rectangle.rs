//! # Largest Rectangle Scanner
//!
//! Finds the largest axis-aligned rectangle that fits under a histogram whose bars
//! all have width 1. The scalar kernel is a single pass over an index stack kept in
//! non-decreasing height order, with a virtual zero-height bar at position `n` that
//! flushes whatever is left on the stack.
//!
//! ## Errors
//! - **InvalidColumn**: largest_rectangle: the input names a column the series does not have.
//! - **NegativeHeight**: largest_rectangle: a bar height is below zero.
//! - **AreaOverflow**: largest_rectangle: `height * width` does not fit in a `u64`.
//!
//! ## Returns
//! - **`Ok(LargestRectangleOutput)`** with the maximal area and the span of one
//!   rectangle achieving it (`None` when the area is 0). Empty input yields area 0.
//! - **`Err(LargestRectangleError)`** otherwise.

use crate::utilities::data_loader::{source_type, Series};
use crate::utilities::enums::Kernel;
use crate::utilities::helpers::detect_best_kernel;
use serde::Serialize;
use thiserror::Error;

// --- INPUT/OUTPUT TYPES ---

#[derive(Debug, Clone)]
pub enum LargestRectangleData<'a> {
	Series { series: &'a Series, column: &'a str },
	Slice(&'a [i64]),
}

impl<'a> LargestRectangleInput<'a> {
	/// Resolves the input values. A column missing from the series is an error.
	#[inline(always)]
	pub fn as_slice(&self) -> Result<&'a [i64], LargestRectangleError> {
		match self.data {
			LargestRectangleData::Slice(slice) => Ok(slice),
			LargestRectangleData::Series { series, column } => {
				source_type(series, column).ok_or_else(|| LargestRectangleError::InvalidColumn { column: column.to_string() })
			}
		}
	}
}

/// Bars `start..=end`, all at least `height` tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RectSpan {
	pub start: usize,
	pub end: usize,
	pub height: u64,
}

impl RectSpan {
	#[inline(always)]
	pub fn width(&self) -> usize {
		self.end + 1 - self.start
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LargestRectangleOutput {
	pub area: u64,
	pub span: Option<RectSpan>,
}

#[derive(Debug, Clone)]
pub struct LargestRectangleInput<'a> {
	pub data: LargestRectangleData<'a>,
}

impl<'a> LargestRectangleInput<'a> {
	#[inline]
	pub fn from_series(s: &'a Series, column: &'a str) -> Self {
		Self {
			data: LargestRectangleData::Series { series: s, column },
		}
	}
	#[inline]
	pub fn from_slice(sl: &'a [i64]) -> Self {
		Self {
			data: LargestRectangleData::Slice(sl),
		}
	}
	#[inline]
	pub fn with_default_series(s: &'a Series) -> Self {
		Self::from_series(s, "heights")
	}
}

// --- BUILDER ---

#[derive(Copy, Clone, Debug, Default)]
pub struct LargestRectangleBuilder {
	kernel: Kernel,
}

impl LargestRectangleBuilder {
	#[inline(always)]
	pub fn new() -> Self {
		Self::default()
	}
	#[inline(always)]
	pub fn kernel(mut self, k: Kernel) -> Self {
		self.kernel = k;
		self
	}
	#[inline(always)]
	pub fn apply(self, s: &Series) -> Result<LargestRectangleOutput, LargestRectangleError> {
		let i = LargestRectangleInput::with_default_series(s);
		largest_rectangle_with_kernel(&i, self.kernel)
	}
	#[inline(always)]
	pub fn apply_slice(self, d: &[i64]) -> Result<LargestRectangleOutput, LargestRectangleError> {
		let i = LargestRectangleInput::from_slice(d);
		largest_rectangle_with_kernel(&i, self.kernel)
	}
}

// --- ERROR ---

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LargestRectangleError {
	#[error("largest_rectangle: Invalid column: {column}")]
	InvalidColumn { column: String },
	#[error("largest_rectangle: Negative height {value} at index {index}")]
	NegativeHeight { index: usize, value: i64 },
	#[error("largest_rectangle: Area overflow: height = {height}, width = {width}")]
	AreaOverflow { height: i64, width: usize },
	#[error("largest_rectangle: Invalid kernel for single scan: {kernel}")]
	InvalidKernel { kernel: Kernel },
}

// --- SCANNER API ---

/// Area of the largest rectangle under `heights`.
#[inline]
pub fn largest_rectangle_area(heights: &[i64]) -> Result<u64, LargestRectangleError> {
	let input = LargestRectangleInput::from_slice(heights);
	largest_rectangle(&input).map(|o| o.area)
}

#[inline]
pub fn largest_rectangle(input: &LargestRectangleInput) -> Result<LargestRectangleOutput, LargestRectangleError> {
	largest_rectangle_with_kernel(input, Kernel::Auto)
}

pub fn largest_rectangle_with_kernel(
	input: &LargestRectangleInput,
	kernel: Kernel,
) -> Result<LargestRectangleOutput, LargestRectangleError> {
	let data = input.as_slice()?;

	if let Some(index) = data.iter().position(|&h| h < 0) {
		return Err(LargestRectangleError::NegativeHeight {
			index,
			value: data[index],
		});
	}

	let chosen = match kernel {
		Kernel::Auto => detect_best_kernel(),
		other => other,
	};

	match chosen {
		Kernel::Scalar => largest_rectangle_scalar(data),
		Kernel::Naive => largest_rectangle_naive(data),
		other => Err(LargestRectangleError::InvalidKernel { kernel: other }),
	}
}

// --- KERNELS ---

#[inline(always)]
fn consider(
	best: &mut LargestRectangleOutput,
	height: i64,
	start: usize,
	end_exclusive: usize,
) -> Result<(), LargestRectangleError> {
	let width = end_exclusive - start;
	let area = (height as u64)
		.checked_mul(width as u64)
		.ok_or(LargestRectangleError::AreaOverflow { height, width })?;
	if area > best.area {
		best.area = area;
		best.span = Some(RectSpan {
			start,
			end: end_exclusive - 1,
			height: height as u64,
		});
	}
	Ok(())
}

/// Monotonic stack scan. Heights must already be validated as non-negative.
pub fn largest_rectangle_scalar(data: &[i64]) -> Result<LargestRectangleOutput, LargestRectangleError> {
	let n = data.len();
	let mut stack: Vec<usize> = Vec::with_capacity(n + 1);
	let mut best = LargestRectangleOutput::default();

	for i in 0..=n {
		let h = if i < n { data[i] } else { 0 };
		while let Some(&top) = stack.last() {
			if data[top] <= h {
				break;
			}
			stack.pop();
			let left = stack.last().map_or(0, |&t| t + 1);
			consider(&mut best, data[top], left, i)?;
		}
		stack.push(i);
	}

	Ok(best)
}

/// Quadratic reference scan: every start index with a running minimum height.
pub fn largest_rectangle_naive(data: &[i64]) -> Result<LargestRectangleOutput, LargestRectangleError> {
	let mut best = LargestRectangleOutput::default();
	for start in 0..data.len() {
		let mut lowest = i64::MAX;
		for end in start..data.len() {
			lowest = lowest.min(data[end]);
			if lowest == 0 {
				break;
			}
			consider(&mut best, lowest, start, end + 1)?;
		}
	}
	Ok(best)
}

// --- TESTS ---

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utilities::data_loader::read_series_from_csv;
	#[cfg(feature = "proptest")]
	use proptest::prelude::*;
	use std::error::Error;

	fn check_largest_rectangle_fixtures(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let cases: [(&[i64], u64); 5] = [
			(&[2, 1, 5, 6, 2, 3], 10),
			(&[2, 4], 4),
			(&[0, 0, 0], 0),
			(&[7], 7),
			(&[], 0),
		];
		for (heights, expected) in cases {
			let out = LargestRectangleBuilder::new().kernel(kernel).apply_slice(heights)?;
			assert_eq!(
				out.area, expected,
				"[{}] LARGEST_RECTANGLE {:?} mismatch for {:?}",
				test_name, kernel, heights
			);
		}
		Ok(())
	}

	fn check_largest_rectangle_span(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let heights = [2, 1, 5, 6, 2, 3];
		let out = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&heights)?;
		let span = out.span.ok_or("missing span")?;
		assert_eq!(span, RectSpan { start: 2, end: 3, height: 5 }, "[{}]", test_name);
		assert_eq!(span.width() as u64 * span.height, out.area);
		assert!(heights[span.start..=span.end].iter().all(|&h| h as u64 >= span.height));

		let flat = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&[0, 0])?;
		assert_eq!(flat.span, None, "[{}] zero area carries no span", test_name);
		Ok(())
	}

	fn check_largest_rectangle_all_zero(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		for len in [1usize, 2, 17, 256] {
			let heights = vec![0i64; len];
			let out = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&heights)?;
			assert_eq!(out.area, 0, "[{}] all-zero length {}", test_name, len);
		}
		Ok(())
	}

	fn check_largest_rectangle_increasing(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		for n in 1..=40i64 {
			let heights: Vec<i64> = (1..=n).collect();
			let expected = (0..n).map(|i| (i + 1) * (n - i)).max().unwrap_or(0) as u64;
			let out = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&heights)?;
			assert_eq!(out.area, expected, "[{}] increasing n = {}", test_name, n);
		}
		Ok(())
	}

	fn check_largest_rectangle_reversal(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let heights = series.column("heights")?;
		let forward = LargestRectangleBuilder::new().kernel(kernel).apply_slice(heights)?;
		let reversed: Vec<i64> = heights.iter().rev().copied().collect();
		let backward = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&reversed)?;
		assert_eq!(forward.area, backward.area, "[{}] reversal changed the area", test_name);
		let tallest = heights.iter().copied().max().unwrap_or(0) as u64;
		assert!(forward.area >= tallest, "[{}] area below tallest bar", test_name);
		Ok(())
	}

	fn check_largest_rectangle_series_accuracy(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let input = LargestRectangleInput::with_default_series(&series);
		match input.data {
			LargestRectangleData::Series { column, .. } => assert_eq!(column, "heights"),
			_ => panic!("Expected LargestRectangleData::Series"),
		}
		let out = largest_rectangle_with_kernel(&input, kernel)?;
		assert_eq!(out.area, 111, "[{}] LARGEST_RECTANGLE {:?} fixture area", test_name, kernel);
		Ok(())
	}

	fn check_largest_rectangle_negative(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let res = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&[3, 1, -2, 4]);
		assert_eq!(
			res,
			Err(LargestRectangleError::NegativeHeight { index: 2, value: -2 }),
			"[{}] negative height must be rejected",
			test_name
		);
		Ok(())
	}

	fn check_largest_rectangle_overflow(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let res = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&[i64::MAX; 3]);
		assert!(
			matches!(res, Err(LargestRectangleError::AreaOverflow { .. })),
			"[{}] expected overflow, got {:?}",
			test_name,
			res
		);
		let ok = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&[i64::MAX; 2])?;
		assert_eq!(ok.area, 2 * i64::MAX as u64);
		Ok(())
	}

	#[cfg(feature = "proptest")]
	fn check_largest_rectangle_property(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let strat = proptest::collection::vec(0i64..=10_000, 0..200);
		proptest::test_runner::TestRunner::default()
			.run(&strat, |heights| {
				let got = LargestRectangleBuilder::new().kernel(kernel).apply_slice(&heights).unwrap();
				let reference = largest_rectangle_naive(&heights).unwrap();
				prop_assert_eq!(got.area, reference.area);
				if let Some(span) = got.span {
					prop_assert_eq!(span.width() as u64 * span.height, got.area);
					prop_assert!(heights[span.start..=span.end].iter().all(|&h| h as u64 >= span.height));
				}
				Ok(())
			})
			.map_err(|e| format!("[{}] {}", test_name, e))?;
		Ok(())
	}

	fn check_largest_rectangle_unknown_column(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let input = LargestRectangleInput::from_series(&series, "heigths");
		assert_eq!(
			largest_rectangle_with_kernel(&input, kernel),
			Err(LargestRectangleError::InvalidColumn { column: "heigths".to_string() }),
			"[{}]",
			test_name
		);
		let upper = LargestRectangleInput::from_series(&series, "HEIGHTS");
		assert_eq!(largest_rectangle_with_kernel(&upper, kernel)?.area, 111, "[{}]", test_name);
		Ok(())
	}

	macro_rules! generate_all_largest_rectangle_tests {
		($($test_fn:ident),*) => {
			paste::paste! {
				$( #[test] fn [<$test_fn _scalar>]() { $test_fn(stringify!([<$test_fn _scalar>]), Kernel::Scalar).unwrap(); } )*
				$( #[test] fn [<$test_fn _naive>]() { $test_fn(stringify!([<$test_fn _naive>]), Kernel::Naive).unwrap(); } )*
			}
		}
	}

	generate_all_largest_rectangle_tests!(
		check_largest_rectangle_fixtures,
		check_largest_rectangle_span,
		check_largest_rectangle_all_zero,
		check_largest_rectangle_increasing,
		check_largest_rectangle_reversal,
		check_largest_rectangle_series_accuracy,
		check_largest_rectangle_negative,
		check_largest_rectangle_overflow,
		check_largest_rectangle_unknown_column
	);

	#[cfg(feature = "proptest")]
	generate_all_largest_rectangle_tests!(check_largest_rectangle_property);

	#[test]
	fn test_batch_kernel_rejected() {
		let res = LargestRectangleBuilder::new().kernel(Kernel::ScalarBatch).apply_slice(&[1, 2]);
		assert_eq!(res, Err(LargestRectangleError::InvalidKernel { kernel: Kernel::ScalarBatch }));
	}

	#[test]
	fn test_area_convenience() {
		assert_eq!(largest_rectangle_area(&[2, 1, 5, 6, 2, 3]), Ok(10));
		assert_eq!(largest_rectangle_area(&[]), Ok(0));
	}
}
