//! FIFO queue built from two stacks.

/// Pushes land on `inbox`; pops and peeks are served from `outbox`, which is
/// refilled (reversing `inbox`) only when it runs dry. Amortised O(1) per operation.
#[derive(Debug, Clone)]
pub struct TwoStackQueue<T> {
	inbox: Vec<T>,
	outbox: Vec<T>,
}

impl<T> Default for TwoStackQueue<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> TwoStackQueue<T> {
	pub fn new() -> Self {
		Self {
			inbox: Vec::new(),
			outbox: Vec::new(),
		}
	}

	#[inline]
	pub fn push(&mut self, value: T) {
		self.inbox.push(value);
	}

	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		self.shift();
		self.outbox.pop()
	}

	#[inline]
	pub fn peek(&mut self) -> Option<&T> {
		self.shift();
		self.outbox.last()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.inbox.len() + self.outbox.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inbox.is_empty() && self.outbox.is_empty()
	}

	#[inline(always)]
	fn shift(&mut self) {
		if self.outbox.is_empty() {
			self.outbox.extend(self.inbox.drain(..).rev());
		}
	}
}
