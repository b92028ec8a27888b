//! # Knuth-Morris-Pratt Matcher
//!
//! Substring search in O(n + m) using the pattern's prefix function: `lps[i]` is the
//! length of the longest proper prefix of `pattern[..=i]` that is also its suffix. On a
//! mismatch the scan falls back along `lps` instead of restarting.
//!
//! Works on any `PartialEq` element type; search `&str` through `as_bytes()`.

#[derive(Debug, Clone)]
pub struct KmpMatcher<'a, T> {
	pattern: &'a [T],
	lps: Vec<usize>,
}

impl<'a, T: PartialEq> KmpMatcher<'a, T> {
	pub fn new(pattern: &'a [T]) -> Self {
		Self {
			pattern,
			lps: prefix_function(pattern),
		}
	}

	#[inline]
	pub fn pattern(&self) -> &[T] {
		self.pattern
	}

	#[inline]
	pub fn lps(&self) -> &[usize] {
		&self.lps
	}

	/// Start of the first occurrence. An empty pattern matches at 0.
	pub fn find(&self, haystack: &[T]) -> Option<usize> {
		if self.pattern.is_empty() {
			return Some(0);
		}
		self.scan(haystack, true).into_iter().next()
	}

	/// Starts of every occurrence, overlapping ones included. An empty pattern matches
	/// at every position `0..=haystack.len()`.
	pub fn find_all(&self, haystack: &[T]) -> Vec<usize> {
		if self.pattern.is_empty() {
			return (0..=haystack.len()).collect();
		}
		self.scan(haystack, false)
	}

	fn scan(&self, haystack: &[T], first_only: bool) -> Vec<usize> {
		let m = self.pattern.len();
		let mut hits = Vec::new();
		if m > haystack.len() {
			return hits;
		}
		let mut j = 0;
		for (i, c) in haystack.iter().enumerate() {
			while j > 0 && *c != self.pattern[j] {
				j = self.lps[j - 1];
			}
			if *c == self.pattern[j] {
				j += 1;
			}
			if j == m {
				hits.push(i + 1 - m);
				if first_only {
					break;
				}
				j = self.lps[j - 1];
			}
		}
		hits
	}
}

/// Prefix function of `pattern`.
pub fn prefix_function<T: PartialEq>(pattern: &[T]) -> Vec<usize> {
	let mut lps = vec![0; pattern.len()];
	let mut len = 0;
	for i in 1..pattern.len() {
		while len > 0 && pattern[i] != pattern[len] {
			len = lps[len - 1];
		}
		if pattern[i] == pattern[len] {
			len += 1;
		}
		lps[i] = len;
	}
	lps
}

/// First occurrence of `needle` in `haystack`, by byte offset.
pub fn find_str(haystack: &str, needle: &str) -> Option<usize> {
	KmpMatcher::new(needle.as_bytes()).find(haystack.as_bytes())
}
