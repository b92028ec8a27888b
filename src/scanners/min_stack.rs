//! Stack with O(1) access to its current minimum.

/// LIFO stack that also answers `min()` in constant time.
///
/// A second stack records every value that was `<=` the minimum at the time it was
/// pushed; popping a value equal to that stack's top pops it too.
#[derive(Debug, Clone, Default)]
pub struct MinStack<T> {
	values: Vec<T>,
	minima: Vec<T>,
}

impl<T: Ord + Copy> MinStack<T> {
	pub fn new() -> Self {
		Self {
			values: Vec::new(),
			minima: Vec::new(),
		}
	}

	pub fn with_capacity(cap: usize) -> Self {
		Self {
			values: Vec::with_capacity(cap),
			minima: Vec::new(),
		}
	}

	#[inline]
	pub fn push(&mut self, value: T) {
		self.values.push(value);
		match self.minima.last() {
			Some(&m) if value > m => {}
			_ => self.minima.push(value),
		}
	}

	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		let v = self.values.pop()?;
		if self.minima.last() == Some(&v) {
			self.minima.pop();
		}
		Some(v)
	}

	#[inline]
	pub fn top(&self) -> Option<T> {
		self.values.last().copied()
	}

	#[inline]
	pub fn min(&self) -> Option<T> {
		self.minima.last().copied()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.values.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<T: Ord + Copy> FromIterator<T> for MinStack<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut stack = MinStack::new();
		for v in iter {
			stack.push(v);
		}
		stack
	}
}

impl<T: Ord + Copy> Extend<T> for MinStack<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for v in iter {
			self.push(v);
		}
	}
}
