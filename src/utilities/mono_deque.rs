/// Fixed-capacity ring buffer of indices into a caller-owned slice, kept monotonic
/// in the values those indices point at.
///
/// Capacity is rounded up to a power of two so wrap-around is a mask. One slot is
/// always left free, so callers must size it for at least `max_live + 1` entries.
#[derive(Clone, Debug)]
pub struct MonoDeque {
    buf:  Vec<usize>,
    head: usize,
    tail: usize,
    mask: usize,
}

impl MonoDeque {
    pub fn with_capacity(cap: usize) -> Self {
        let size = (cap + 1).next_power_of_two();
        Self { buf: vec![0; size], head: 0, tail: 0, mask: size - 1 }
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.head == self.tail }
    #[inline(always)]
    pub fn len(&self) -> usize { self.tail.wrapping_sub(self.head) & self.mask }
    #[inline(always)]
    pub fn clear(&mut self) { self.head = 0; self.tail = 0; }
    #[inline(always)]
    pub fn front(&self) -> Option<usize> {
        if self.is_empty() { None } else { Some(self.buf[self.head]) }
    }
    #[inline(always)]
    pub fn back(&self) -> Option<usize> {
        if self.is_empty() { None } else { Some(self.buf[self.tail.wrapping_sub(1) & self.mask]) }
    }
    #[inline(always)]
    pub fn pop_front(&mut self) -> Option<usize> {
        let idx = self.front()?;
        self.head = (self.head + 1) & self.mask;
        Some(idx)
    }
    #[inline(always)]
    pub fn pop_back(&mut self) -> Option<usize> {
        let idx = self.back()?;
        self.tail = self.tail.wrapping_sub(1) & self.mask;
        Some(idx)
    }

    #[inline(always)]
    fn push_back(&mut self, idx: usize) {
        debug_assert!(self.len() < self.mask, "MonoDeque overflow: capacity {}", self.mask);
        self.buf[self.tail] = idx;
        self.tail = (self.tail + 1) & self.mask;
    }

    /// Pushes `idx`, first evicting every back entry whose value is `<= src[idx]`.
    /// Front-to-back values stay non-increasing, so the front is the maximum.
    #[inline(always)]
    pub fn push_max<T: PartialOrd>(&mut self, idx: usize, src: &[T]) {
        while let Some(b) = self.back() {
            if src[idx] >= src[b] { self.pop_back(); } else { break; }
        }
        self.push_back(idx);
    }

    /// Pushes `idx`, first evicting every back entry whose value is `>= src[idx]`.
    /// Front-to-back values stay non-decreasing, so the front is the minimum.
    #[inline(always)]
    pub fn push_min<T: PartialOrd>(&mut self, idx: usize, src: &[T]) {
        while let Some(b) = self.back() {
            if src[idx] <= src[b] { self.pop_back(); } else { break; }
        }
        self.push_back(idx);
    }

    /// Drops front indices older than `oldest_allowed`.
    #[inline(always)]
    pub fn expire(&mut self, oldest_allowed: usize) {
        while let Some(f) = self.front() {
            if f < oldest_allowed { self.pop_front(); } else { break; }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_max_keeps_front_at_maximum() {
        let src = [1, 3, -1, -3, 5, 3, 6, 7];
        let mut dq = MonoDeque::with_capacity(src.len());
        dq.push_max(0, &src);
        dq.push_max(1, &src);
        assert_eq!(dq.len(), 1);
        assert_eq!(dq.front(), Some(1));
        dq.push_max(2, &src);
        dq.push_max(3, &src);
        assert_eq!(dq.len(), 3);
        dq.push_max(4, &src);
        assert_eq!(dq.front(), Some(4));
        assert_eq!(dq.back(), Some(4));
    }

    #[test]
    fn test_push_min_and_expire() {
        let src = [4, 2, 2, 5, 1];
        let mut dq = MonoDeque::with_capacity(src.len());
        for i in 0..4 {
            dq.push_min(i, &src);
        }
        // the second 2 replaced the first
        assert_eq!(dq.front(), Some(2));
        assert_eq!(dq.back(), Some(3));
        dq.expire(3);
        assert_eq!(dq.front(), Some(3));
        dq.expire(10);
        assert!(dq.is_empty());
        assert_eq!(dq.pop_front(), None);
        assert_eq!(dq.pop_back(), None);
    }

    #[test]
    fn test_wraps_around_small_capacity() {
        let src: Vec<i64> = (0..100).rev().collect();
        let mut dq = MonoDeque::with_capacity(3);
        for i in 0..src.len() {
            dq.expire(i.saturating_sub(2));
            dq.push_max(i, &src);
            assert!(dq.len() <= 3);
            assert_eq!(dq.front(), Some(i.saturating_sub(2)));
        }
        dq.clear();
        assert!(dq.is_empty());
    }
}
