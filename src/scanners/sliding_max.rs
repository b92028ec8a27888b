//! # Sliding Window Maximum
//!
//! Reports the maximum of every contiguous window of width `window` as it slides
//! left to right one step at a time. The scalar kernel keeps a deque of indices whose
//! values are non-increasing front to back, so the front is always the current
//! maximum and each index is pushed and popped at most once.
//!
//! ## Parameters
//! - **window**: Window width (default: 3). Must satisfy `1 <= window <= data length`.
//!
//! ## Errors
//! - **InvalidColumn**: sliding_max: the input names a column the series does not have.
//! - **InvalidWindow**: sliding_max: `window` is zero or exceeds the data length
//!   (this includes empty input).
//! - **InvalidKernel**: sliding_max: a batch kernel was passed to a single scan or vice versa.
//! - **EmptySweep**: sliding_max: a batch range expanded to no windows.
//!
//! ## Returns
//! - **`Ok(SlidingMaxOutput)`** with `data.len() - window + 1` values; element `j` is the
//!   maximum of `data[j..j + window]`.
//! - **`Err(SlidingMaxError)`** otherwise.

use crate::utilities::data_loader::{source_type, Series};
use crate::utilities::enums::Kernel;
use crate::utilities::helpers::{detect_best_batch_kernel, detect_best_kernel, expand_axis};
use crate::utilities::mono_deque::MonoDeque;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

const DEFAULT_WINDOW: usize = 3;

// --- INPUT/OUTPUT TYPES ---

#[derive(Debug, Clone)]
pub enum SlidingMaxData<'a> {
	Series { series: &'a Series, column: &'a str },
	Slice(&'a [i64]),
}

impl<'a> SlidingMaxInput<'a> {
	/// Resolves the input values. A column missing from the series is an error.
	#[inline(always)]
	pub fn as_slice(&self) -> Result<&'a [i64], SlidingMaxError> {
		match self.data {
			SlidingMaxData::Slice(slice) => Ok(slice),
			SlidingMaxData::Series { series, column } => {
				source_type(series, column).ok_or_else(|| SlidingMaxError::InvalidColumn { column: column.to_string() })
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlidingMaxOutput {
	pub values: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingMaxParams {
	pub window: Option<usize>,
}

impl Default for SlidingMaxParams {
	fn default() -> Self {
		Self {
			window: Some(DEFAULT_WINDOW),
		}
	}
}

#[derive(Debug, Clone)]
pub struct SlidingMaxInput<'a> {
	pub data: SlidingMaxData<'a>,
	pub params: SlidingMaxParams,
}

impl<'a> SlidingMaxInput<'a> {
	#[inline]
	pub fn from_series(s: &'a Series, column: &'a str, p: SlidingMaxParams) -> Self {
		Self {
			data: SlidingMaxData::Series { series: s, column },
			params: p,
		}
	}
	#[inline]
	pub fn from_slice(sl: &'a [i64], p: SlidingMaxParams) -> Self {
		Self {
			data: SlidingMaxData::Slice(sl),
			params: p,
		}
	}
	#[inline]
	pub fn with_default_series(s: &'a Series) -> Self {
		Self::from_series(s, "samples", SlidingMaxParams::default())
	}
	#[inline]
	pub fn get_window(&self) -> usize {
		self.params.window.unwrap_or(DEFAULT_WINDOW)
	}
}

// --- BUILDER ---

#[derive(Copy, Clone, Debug, Default)]
pub struct SlidingMaxBuilder {
	window: Option<usize>,
	kernel: Kernel,
}

impl SlidingMaxBuilder {
	#[inline(always)]
	pub fn new() -> Self {
		Self::default()
	}
	#[inline(always)]
	pub fn window(mut self, k: usize) -> Self {
		self.window = Some(k);
		self
	}
	#[inline(always)]
	pub fn kernel(mut self, k: Kernel) -> Self {
		self.kernel = k;
		self
	}
	#[inline(always)]
	pub fn apply(self, s: &Series) -> Result<SlidingMaxOutput, SlidingMaxError> {
		let p = SlidingMaxParams { window: self.window };
		let i = SlidingMaxInput::from_series(s, "samples", p);
		sliding_max_with_kernel(&i, self.kernel)
	}
	#[inline(always)]
	pub fn apply_slice(self, d: &[i64]) -> Result<SlidingMaxOutput, SlidingMaxError> {
		let p = SlidingMaxParams { window: self.window };
		let i = SlidingMaxInput::from_slice(d, p);
		sliding_max_with_kernel(&i, self.kernel)
	}
	#[inline(always)]
	pub fn into_stream(self) -> Result<SlidingMaxStream, SlidingMaxError> {
		let p = SlidingMaxParams { window: self.window };
		SlidingMaxStream::try_new(p)
	}
}

// --- ERROR ---

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlidingMaxError {
	#[error("sliding_max: Invalid column: {column}")]
	InvalidColumn { column: String },
	#[error("sliding_max: Invalid window: window = {window}, data length = {data_len}")]
	InvalidWindow { window: usize, data_len: usize },
	#[error("sliding_max: Invalid kernel: {kernel}")]
	InvalidKernel { kernel: Kernel },
	#[error("sliding_max: Empty sweep: start = {start}, end = {end}, step = {step}")]
	EmptySweep { start: usize, end: usize, step: usize },
	#[error("sliding_max: Output length mismatch: expected = {expected}, got = {got}")]
	OutputLength { expected: usize, got: usize },
}

// --- SCANNER API ---

/// Maximum of every width-`k` window of `nums`.
#[inline]
pub fn max_sliding_window(nums: &[i64], k: usize) -> Result<Vec<i64>, SlidingMaxError> {
	let input = SlidingMaxInput::from_slice(nums, SlidingMaxParams { window: Some(k) });
	sliding_max(&input).map(|o| o.values)
}

#[inline]
pub fn sliding_max(input: &SlidingMaxInput) -> Result<SlidingMaxOutput, SlidingMaxError> {
	sliding_max_with_kernel(input, Kernel::Auto)
}

#[inline(always)]
fn validate_window(window: usize, len: usize) -> Result<(), SlidingMaxError> {
	if window == 0 || window > len {
		return Err(SlidingMaxError::InvalidWindow { window, data_len: len });
	}
	Ok(())
}

#[inline(always)]
fn resolve_single(kernel: Kernel) -> Result<Kernel, SlidingMaxError> {
	match kernel {
		Kernel::Auto => Ok(detect_best_kernel()),
		other if other.is_batch() => Err(SlidingMaxError::InvalidKernel { kernel: other }),
		other => Ok(other),
	}
}

pub fn sliding_max_with_kernel(input: &SlidingMaxInput, kernel: Kernel) -> Result<SlidingMaxOutput, SlidingMaxError> {
	let data = input.as_slice()?;
	let window = input.get_window();
	validate_window(window, data.len())?;
	let chosen = resolve_single(kernel)?;

	let mut out = vec![0i64; data.len() - window + 1];
	run_kernel(chosen, data, window, &mut out);
	Ok(SlidingMaxOutput { values: out })
}

/// Writes the window maxima into `out`, which must hold exactly `data.len() - window + 1` values.
pub fn sliding_max_into_slice(out: &mut [i64], input: &SlidingMaxInput, kernel: Kernel) -> Result<(), SlidingMaxError> {
	let data = input.as_slice()?;
	let window = input.get_window();
	validate_window(window, data.len())?;
	let expected = data.len() - window + 1;
	if out.len() != expected {
		return Err(SlidingMaxError::OutputLength {
			expected,
			got: out.len(),
		});
	}
	let chosen = resolve_single(kernel)?;
	run_kernel(chosen, data, window, out);
	Ok(())
}

#[inline(always)]
fn run_kernel(kernel: Kernel, data: &[i64], window: usize, out: &mut [i64]) {
	match kernel {
		Kernel::Naive => sliding_max_naive(data, window, out),
		_ => sliding_max_scalar(data, window, out),
	}
}

// --- KERNELS ---

/// Monotonic deque scan. Expects `1 <= window <= data.len()` and `out.len() == data.len() - window + 1`.
#[inline]
pub fn sliding_max_scalar(data: &[i64], window: usize, out: &mut [i64]) {
	let mut dq = MonoDeque::with_capacity(window);
	for i in 0..data.len() {
		if i >= window {
			dq.expire(i + 1 - window);
		}
		dq.push_max(i, data);
		if i + 1 >= window {
			if let Some(front) = dq.front() {
				out[i + 1 - window] = data[front];
			}
		}
	}
}

/// Brute-force O(n * window) reference scan.
#[inline]
pub fn sliding_max_naive(data: &[i64], window: usize, out: &mut [i64]) {
	for (slot, w) in out.iter_mut().zip(data.windows(window)) {
		if let Some(&m) = w.iter().max() {
			*slot = m;
		}
	}
}

// --- STREAMING ---

/// Incremental scanner over an unbounded sequence.
///
/// Stores `(position, value)` pairs because fed values are not retained anywhere,
/// so there is no slice for a `MonoDeque` of indices to point into.
#[derive(Debug, Clone)]
pub struct SlidingMaxStream {
	window: usize,
	seen: usize,
	candidates: VecDeque<(usize, i64)>,
}

impl SlidingMaxStream {
	pub fn try_new(params: SlidingMaxParams) -> Result<Self, SlidingMaxError> {
		let window = params.window.unwrap_or(DEFAULT_WINDOW);
		if window == 0 {
			return Err(SlidingMaxError::InvalidWindow { window, data_len: 0 });
		}
		Ok(Self {
			window,
			seen: 0,
			candidates: VecDeque::with_capacity(window),
		})
	}

	/// Feeds one value. Returns `None` until the first window is full.
	#[inline(always)]
	pub fn update(&mut self, value: i64) -> Option<i64> {
		while let Some(&(_, v)) = self.candidates.back() {
			if v <= value {
				self.candidates.pop_back();
			} else {
				break;
			}
		}
		self.candidates.push_back((self.seen, value));
		self.seen += 1;
		if self.seen < self.window {
			return None;
		}
		let oldest = self.seen - self.window;
		while let Some(&(idx, _)) = self.candidates.front() {
			if idx < oldest {
				self.candidates.pop_front();
			} else {
				break;
			}
		}
		self.candidates.front().map(|&(_, v)| v)
	}

	pub fn reset(&mut self) {
		self.seen = 0;
		self.candidates.clear();
	}
}

// --- BATCH API (Window Sweep) ---

#[derive(Clone, Debug)]
pub struct SlidingMaxBatchRange {
	pub window: (usize, usize, usize),
}

impl Default for SlidingMaxBatchRange {
	fn default() -> Self {
		Self {
			window: (DEFAULT_WINDOW, DEFAULT_WINDOW, 0),
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct SlidingMaxBatchBuilder {
	range: SlidingMaxBatchRange,
	kernel: Kernel,
}

impl SlidingMaxBatchBuilder {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn kernel(mut self, k: Kernel) -> Self {
		self.kernel = k;
		self
	}
	pub fn window_range(mut self, start: usize, end: usize, step: usize) -> Self {
		self.range.window = (start, end, step);
		self
	}
	pub fn window_static(mut self, k: usize) -> Self {
		self.range.window = (k, k, 0);
		self
	}
	pub fn apply_slice(self, data: &[i64]) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
		sliding_max_batch_with_kernel(data, &self.range, self.kernel)
	}
	pub fn apply_series(self, s: &Series, column: &str) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
		let data = source_type(s, column).ok_or_else(|| SlidingMaxError::InvalidColumn { column: column.to_string() })?;
		self.apply_slice(data)
	}
	pub fn with_default_series(s: &Series) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
		SlidingMaxBatchBuilder::new()
			.kernel(Kernel::Auto)
			.apply_series(s, "samples")
	}
}

/// Row-major `rows x cols` matrix. Column `i` of a row holds the maximum of the window
/// ending at `i`, or `None` while that row's first window is still filling.
#[derive(Clone, Debug, Serialize)]
pub struct SlidingMaxBatchOutput {
	pub values: Vec<Option<i64>>,
	pub combos: Vec<SlidingMaxParams>,
	pub rows: usize,
	pub cols: usize,
}

impl SlidingMaxBatchOutput {
	pub fn row_for_params(&self, p: &SlidingMaxParams) -> Option<usize> {
		self.combos
			.iter()
			.position(|c| c.window.unwrap_or(DEFAULT_WINDOW) == p.window.unwrap_or(DEFAULT_WINDOW))
	}
	pub fn values_for(&self, p: &SlidingMaxParams) -> Option<&[Option<i64>]> {
		self.row_for_params(p).map(|row| {
			let start = row * self.cols;
			&self.values[start..start + self.cols]
		})
	}
}

pub fn sliding_max_batch_with_kernel(
	data: &[i64],
	sweep: &SlidingMaxBatchRange,
	k: Kernel,
) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
	let kernel = match k {
		Kernel::Auto => detect_best_batch_kernel(),
		other if other.is_batch() => other,
		other => return Err(SlidingMaxError::InvalidKernel { kernel: other }),
	};
	sliding_max_batch_par_slice(data, sweep, kernel.to_single())
}

#[inline(always)]
fn expand_grid(r: &SlidingMaxBatchRange) -> Vec<SlidingMaxParams> {
	expand_axis(r.window)
		.into_iter()
		.map(|w| SlidingMaxParams { window: Some(w) })
		.collect()
}

#[inline(always)]
pub fn sliding_max_batch_slice(
	data: &[i64],
	sweep: &SlidingMaxBatchRange,
	kern: Kernel,
) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
	sliding_max_batch_inner(data, sweep, kern, false)
}

#[inline(always)]
pub fn sliding_max_batch_par_slice(
	data: &[i64],
	sweep: &SlidingMaxBatchRange,
	kern: Kernel,
) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
	sliding_max_batch_inner(data, sweep, kern, true)
}

fn sliding_max_batch_inner(
	data: &[i64],
	sweep: &SlidingMaxBatchRange,
	kern: Kernel,
	parallel: bool,
) -> Result<SlidingMaxBatchOutput, SlidingMaxError> {
	let kern = resolve_single(kern)?;
	let combos = expand_grid(sweep);
	if combos.is_empty() {
		let (start, end, step) = sweep.window;
		return Err(SlidingMaxError::EmptySweep { start, end, step });
	}
	for c in &combos {
		validate_window(c.window.unwrap_or(DEFAULT_WINDOW), data.len())?;
	}

	let rows = combos.len();
	let cols = data.len();
	log::debug!(
		"sliding_max batch: {} rows x {} cols, kernel {}, parallel {}",
		rows,
		cols,
		kern,
		parallel
	);

	let mut values: Vec<Option<i64>> = vec![None; rows * cols];

	let do_row = |row: usize, out_row: &mut [Option<i64>]| {
		let window = combos[row].window.unwrap_or(DEFAULT_WINDOW);
		let mut maxima = vec![0i64; cols - window + 1];
		run_kernel(kern, data, window, &mut maxima);
		for (slot, v) in out_row[window - 1..].iter_mut().zip(maxima) {
			*slot = Some(v);
		}
	};

	if parallel {
		#[cfg(not(target_arch = "wasm32"))]
		{
			values
				.par_chunks_mut(cols)
				.enumerate()
				.for_each(|(row, slice)| do_row(row, slice));
		}

		#[cfg(target_arch = "wasm32")]
		{
			for (row, slice) in values.chunks_mut(cols).enumerate() {
				do_row(row, slice);
			}
		}
	} else {
		for (row, slice) in values.chunks_mut(cols).enumerate() {
			do_row(row, slice);
		}
	}

	Ok(SlidingMaxBatchOutput {
		values,
		combos,
		rows,
		cols,
	})
}

// --- TESTS ---

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utilities::data_loader::read_series_from_csv;
	#[cfg(feature = "proptest")]
	use proptest::prelude::*;
	use std::error::Error;

	fn brute_force(data: &[i64], window: usize) -> Vec<i64> {
		data.windows(window).map(|w| *w.iter().max().unwrap()).collect()
	}

	fn check_sliding_max_fixture(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let nums = [1, 3, -1, -3, 5, 3, 6, 7];
		let out = SlidingMaxBuilder::new().window(3).kernel(kernel).apply_slice(&nums)?;
		assert_eq!(out.values, vec![3, 3, 5, 5, 6, 7], "[{}] SLIDING_MAX {:?}", test_name, kernel);
		Ok(())
	}

	fn check_sliding_max_accuracy(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let expected: [(usize, [i64; 5]); 3] = [
			(3, [49, 23, 23, 23, 17]),
			(5, [49, 49, 49, 23, 23]),
			(10, [49, 49, 49, 49, 49]),
		];
		for (window, last_five) in expected {
			let input = SlidingMaxInput::from_series(&series, "samples", SlidingMaxParams { window: Some(window) });
			let out = sliding_max_with_kernel(&input, kernel)?;
			assert_eq!(out.values.len(), series.len() - window + 1);
			let start = out.values.len() - 5;
			assert_eq!(
				out.values[start..],
				last_five,
				"[{}] SLIDING_MAX {:?} window {} last five",
				test_name,
				kernel,
				window
			);
		}
		Ok(())
	}

	fn check_sliding_max_default_series(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let input = SlidingMaxInput::with_default_series(&series);
		match input.data {
			SlidingMaxData::Series { column, .. } => assert_eq!(column, "samples"),
			_ => panic!("Expected SlidingMaxData::Series"),
		}
		assert_eq!(input.get_window(), 3);
		let out = sliding_max_with_kernel(&input, kernel)?;
		assert_eq!(out.values.len(), series.len() - 2, "[{}]", test_name);
		Ok(())
	}

	fn check_sliding_max_identity(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let nums = [5, -2, 5, 9, 0, -7, 3];
		let out = SlidingMaxBuilder::new().window(1).kernel(kernel).apply_slice(&nums)?;
		assert_eq!(out.values, nums.to_vec(), "[{}] window 1 must be identity", test_name);
		Ok(())
	}

	fn check_sliding_max_full_window(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let nums = [5, -2, 5, 9, 0, -7, 3];
		let out = SlidingMaxBuilder::new().window(nums.len()).kernel(kernel).apply_slice(&nums)?;
		assert_eq!(out.values, vec![9], "[{}] full window is the global max", test_name);
		Ok(())
	}

	fn check_sliding_max_ties_and_descending(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let ties = [4, 4, 4, 1, 4, 1, 1, 1];
		let out = SlidingMaxBuilder::new().window(3).kernel(kernel).apply_slice(&ties)?;
		assert_eq!(out.values, brute_force(&ties, 3), "[{}] ties", test_name);

		let desc: Vec<i64> = (0..50).rev().collect();
		let out = SlidingMaxBuilder::new().window(7).kernel(kernel).apply_slice(&desc)?;
		assert_eq!(out.values, brute_force(&desc, 7), "[{}] descending", test_name);
		Ok(())
	}

	fn check_sliding_max_invalid_window(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let nums = [1, 2, 3];
		for window in [0usize, 4, 100] {
			let res = SlidingMaxBuilder::new().window(window).kernel(kernel).apply_slice(&nums);
			assert_eq!(
				res,
				Err(SlidingMaxError::InvalidWindow { window, data_len: 3 }),
				"[{}] window {} must be rejected",
				test_name,
				window
			);
		}
		let empty = SlidingMaxBuilder::new().window(1).kernel(kernel).apply_slice(&[]);
		assert!(empty.is_err(), "[{}] empty input must be rejected", test_name);
		Ok(())
	}

	fn check_sliding_max_into_slice(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let nums = [1, 3, -1, -3, 5, 3, 6, 7];
		let input = SlidingMaxInput::from_slice(&nums, SlidingMaxParams { window: Some(3) });
		let mut out = [0i64; 6];
		sliding_max_into_slice(&mut out, &input, kernel)?;
		assert_eq!(out, [3, 3, 5, 5, 6, 7], "[{}]", test_name);

		let mut short = [0i64; 5];
		let res = sliding_max_into_slice(&mut short, &input, kernel);
		assert_eq!(res, Err(SlidingMaxError::OutputLength { expected: 6, got: 5 }));
		Ok(())
	}

	fn check_sliding_max_streaming(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let samples = series.column("samples")?;
		for window in [1usize, 3, 8, 20] {
			let batch = SlidingMaxBuilder::new().window(window).kernel(kernel).apply_slice(samples)?.values;
			let mut stream = SlidingMaxBuilder::new().window(window).into_stream()?;
			let streamed: Vec<Option<i64>> = samples.iter().map(|&v| stream.update(v)).collect();
			assert!(streamed[..window - 1].iter().all(Option::is_none), "[{}] warmup", test_name);
			let tail: Vec<i64> = streamed[window - 1..].iter().map(|v| v.unwrap()).collect();
			assert_eq!(tail, batch, "[{}] streaming mismatch for window {}", test_name, window);
		}
		Ok(())
	}

	#[cfg(feature = "proptest")]
	fn check_sliding_max_property(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let strat = proptest::collection::vec(-10_000i64..=10_000, 1..120)
			.prop_flat_map(|data| {
				let n = data.len();
				(Just(data), 1..=n)
			});
		proptest::test_runner::TestRunner::default()
			.run(&strat, |(data, window)| {
				let out = SlidingMaxBuilder::new().window(window).kernel(kernel).apply_slice(&data).unwrap();
				prop_assert_eq!(out.values.len(), data.len() - window + 1);
				prop_assert_eq!(out.values, brute_force(&data, window));
				Ok(())
			})
			.map_err(|e| format!("[{}] {}", test_name, e))?;
		Ok(())
	}

	fn check_sliding_max_unknown_column(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let missing = || SlidingMaxError::InvalidColumn { column: "sampels".to_string() };
		let input = SlidingMaxInput::from_series(&series, "sampels", SlidingMaxParams::default());
		assert_eq!(sliding_max_with_kernel(&input, kernel), Err(missing()), "[{}]", test_name);
		let mut out = [0i64; 4];
		assert_eq!(sliding_max_into_slice(&mut out, &input, kernel), Err(missing()), "[{}]", test_name);
		Ok(())
	}

	macro_rules! generate_all_sliding_max_tests {
		($($test_fn:ident),*) => {
			paste::paste! {
				$( #[test] fn [<$test_fn _scalar>]() { $test_fn(stringify!([<$test_fn _scalar>]), Kernel::Scalar).unwrap(); } )*
				$( #[test] fn [<$test_fn _naive>]() { $test_fn(stringify!([<$test_fn _naive>]), Kernel::Naive).unwrap(); } )*
			}
		}
	}

	generate_all_sliding_max_tests!(
		check_sliding_max_fixture,
		check_sliding_max_accuracy,
		check_sliding_max_default_series,
		check_sliding_max_identity,
		check_sliding_max_full_window,
		check_sliding_max_ties_and_descending,
		check_sliding_max_invalid_window,
		check_sliding_max_into_slice,
		check_sliding_max_streaming,
		check_sliding_max_unknown_column
	);

	#[cfg(feature = "proptest")]
	generate_all_sliding_max_tests!(check_sliding_max_property);

	fn check_batch_rows_match_single(test: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let samples = series.column("samples")?;
		let output = SlidingMaxBatchBuilder::new()
			.kernel(kernel)
			.window_range(1, 16, 5)
			.apply_slice(samples)?;
		assert_eq!(output.rows, 4, "[{}] windows 1, 6, 11, 16", test);
		assert_eq!(output.cols, samples.len());
		assert_eq!(output.values.len(), output.rows * output.cols);

		for combo in &output.combos {
			let window = combo.window.unwrap();
			let row = output.values_for(combo).expect("row missing");
			let single = SlidingMaxBuilder::new().window(window).apply_slice(samples)?.values;
			assert!(row[..window - 1].iter().all(Option::is_none), "[{test}] warmup window {window}");
			let tail: Vec<i64> = row[window - 1..].iter().map(|v| v.unwrap()).collect();
			assert_eq!(tail, single, "[{test}] row mismatch for window {window}");
		}
		Ok(())
	}

	fn check_batch_default_row(test: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let output = SlidingMaxBatchBuilder::new().kernel(kernel).apply_series(&series, "samples")?;
		let row = output
			.values_for(&SlidingMaxParams::default())
			.expect("default row missing");
		let expected: [Option<i64>; 5] = [Some(49), Some(23), Some(23), Some(23), Some(17)];
		assert_eq!(row[row.len() - 5..], expected, "[{test}] default-row mismatch");
		assert_eq!(row[..2], [None::<i64>, None]);
		Ok(())
	}

	fn check_batch_rejects_oversized_window(test: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let res = SlidingMaxBatchBuilder::new()
			.kernel(kernel)
			.window_range(2, 10, 4)
			.apply_slice(&[1, 2, 3, 4, 5, 6]);
		// windows 2 and 6 fit, 10 does not
		assert_eq!(
			res.unwrap_err(),
			SlidingMaxError::InvalidWindow { window: 10, data_len: 6 },
			"[{test}]"
		);
		let empty = SlidingMaxBatchBuilder::new().kernel(kernel).window_range(9, 3, 1).apply_slice(&[1, 2]);
		assert_eq!(empty.unwrap_err(), SlidingMaxError::EmptySweep { start: 9, end: 3, step: 1 });
		Ok(())
	}

	fn check_batch_unknown_column(test: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		let series = read_series_from_csv("src/data/sample_series.csv")?;
		let res = SlidingMaxBatchBuilder::new()
			.kernel(kernel)
			.window_range(2, 4, 1)
			.apply_series(&series, "nope");
		assert_eq!(res.unwrap_err(), SlidingMaxError::InvalidColumn { column: "nope".to_string() }, "[{test}]");
		Ok(())
	}

	macro_rules! gen_batch_tests {
		($fn_name:ident) => {
			paste::paste! {
				#[test] fn [<$fn_name _scalar>]() { $fn_name(stringify!([<$fn_name _scalar>]), Kernel::ScalarBatch).unwrap(); }
				#[test] fn [<$fn_name _naive>]() { $fn_name(stringify!([<$fn_name _naive>]), Kernel::NaiveBatch).unwrap(); }
				#[test] fn [<$fn_name _auto_detect>]() { $fn_name(stringify!([<$fn_name _auto_detect>]), Kernel::Auto).unwrap(); }
			}
		};
	}

	gen_batch_tests!(check_batch_rows_match_single);
	gen_batch_tests!(check_batch_default_row);
	gen_batch_tests!(check_batch_rejects_oversized_window);
	gen_batch_tests!(check_batch_unknown_column);

	#[test]
	fn test_kernel_family_mismatch() {
		let single = SlidingMaxBuilder::new().kernel(Kernel::NaiveBatch).apply_slice(&[1, 2, 3]);
		assert_eq!(single, Err(SlidingMaxError::InvalidKernel { kernel: Kernel::NaiveBatch }));
		let batch = SlidingMaxBatchBuilder::new().kernel(Kernel::Scalar).apply_slice(&[1, 2, 3]);
		assert_eq!(batch.unwrap_err(), SlidingMaxError::InvalidKernel { kernel: Kernel::Scalar });
	}

	#[test]
	fn test_sequential_and_parallel_batch_agree() {
		let data: Vec<i64> = (0..300).map(|i| ((i * 7919) % 211) as i64 - 100).collect();
		let sweep = SlidingMaxBatchRange { window: (1, 60, 7) };
		let seq = sliding_max_batch_slice(&data, &sweep, Kernel::Scalar).unwrap();
		let par = sliding_max_batch_par_slice(&data, &sweep, Kernel::Scalar).unwrap();
		assert_eq!(seq.values, par.values);
		assert_eq!(seq.combos, par.combos);
	}

	#[test]
	fn test_stream_long_run_matches_scan() {
		let data: Vec<i64> = (0..10_000i64).map(|i| (i * 7919) % 1_009 - 500).collect();
		for window in [2usize, 17, 256] {
			let mut stream = SlidingMaxStream::try_new(SlidingMaxParams { window: Some(window) }).unwrap();
			let streamed: Vec<i64> = data.iter().filter_map(|&v| stream.update(v)).collect();
			assert_eq!(streamed, max_sliding_window(&data, window).unwrap(), "window {}", window);
		}
	}

	#[test]
	fn test_stream_rejects_zero_window_and_resets() {
		assert!(SlidingMaxStream::try_new(SlidingMaxParams { window: Some(0) }).is_err());
		let mut s = SlidingMaxStream::try_new(SlidingMaxParams { window: Some(2) }).unwrap();
		assert_eq!(s.update(4), None);
		assert_eq!(s.update(1), Some(4));
		assert_eq!(s.update(2), Some(2));
		s.reset();
		assert_eq!(s.update(9), None);
	}

	#[test]
	fn test_convenience_wrapper() {
		assert_eq!(max_sliding_window(&[1, 3, -1, -3, 5, 3, 6, 7], 3), Ok(vec![3, 3, 5, 5, 6, 7]));
		assert_eq!(
			max_sliding_window(&[1, 2], 0),
			Err(SlidingMaxError::InvalidWindow { window: 0, data_len: 2 })
		);
	}
}
