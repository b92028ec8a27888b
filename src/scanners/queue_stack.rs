//! LIFO stack built on a single queue.

use std::collections::VecDeque;

/// Only queue operations are used: each push appends at the back, then rotates
/// the older entries behind it so the newest value sits at the front. Push is
/// O(n); `pop` and `top` are O(1).
#[derive(Debug, Clone)]
pub struct QueueStack<T> {
	queue: VecDeque<T>,
}

impl<T> Default for QueueStack<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> QueueStack<T> {
	pub fn new() -> Self {
		Self { queue: VecDeque::new() }
	}

	#[inline]
	pub fn push(&mut self, value: T) {
		self.queue.push_back(value);
		let older = self.queue.len() - 1;
		self.queue.rotate_left(older);
	}

	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		self.queue.pop_front()
	}

	#[inline]
	pub fn top(&self) -> Option<&T> {
		self.queue.front()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.queue.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}
}
