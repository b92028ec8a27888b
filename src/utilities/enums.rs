use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kernel {
	Auto,
	Scalar,
	Naive,
	ScalarBatch,
	NaiveBatch,
}

impl Default for Kernel {
	fn default() -> Self {
		Kernel::Auto
	}
}

impl Kernel {
	#[inline(always)]
	pub const fn is_batch(self) -> bool {
		matches!(self, Kernel::ScalarBatch | Kernel::NaiveBatch)
	}

	/// Single-series kernel backing a batch kernel. `Auto` and single kernels map to themselves.
	#[inline(always)]
	pub const fn to_single(self) -> Kernel {
		match self {
			Kernel::ScalarBatch => Kernel::Scalar,
			Kernel::NaiveBatch => Kernel::Naive,
			other => other,
		}
	}
}

impl fmt::Display for Kernel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Kernel::Auto => "auto",
			Kernel::Scalar => "scalar",
			Kernel::Naive => "naive",
			Kernel::ScalarBatch => "scalar-batch",
			Kernel::NaiveBatch => "naive-batch",
		};
		f.write_str(name)
	}
}

impl FromStr for Kernel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"auto" => Ok(Kernel::Auto),
			"scalar" => Ok(Kernel::Scalar),
			"naive" => Ok(Kernel::Naive),
			"scalar-batch" | "scalar_batch" => Ok(Kernel::ScalarBatch),
			"naive-batch" | "naive_batch" => Ok(Kernel::NaiveBatch),
			other => Err(format!("Invalid kernel: {}", other)),
		}
	}
}
