//! Bracket balance check over `()`, `[]` and `{}`.

/// True when every bracket closes in order with a matching kind. Other characters are ignored.
pub fn is_balanced(s: &str) -> bool {
	let mut expected: Vec<char> = Vec::with_capacity(s.len() / 2);
	for c in s.chars() {
		match c {
			'(' => expected.push(')'),
			'[' => expected.push(']'),
			'{' => expected.push('}'),
			')' | ']' | '}' => {
				if expected.pop() != Some(c) {
					return false;
				}
			}
			_ => {}
		}
	}
	expected.is_empty()
}
