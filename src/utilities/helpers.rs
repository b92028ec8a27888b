use std::sync::OnceLock;
use crate::utilities::enums::Kernel;

/// Environment variable that pins the kernel `Kernel::Auto` resolves to.
pub const KERNEL_ENV: &str = "MONO_SCAN_KERNEL";

static BEST_SINGLE : OnceLock<Kernel> = OnceLock::new();
static BEST_BATCH  : OnceLock<Kernel> = OnceLock::new();

#[inline(always)]
pub fn detect_best_kernel() -> Kernel {
    *BEST_SINGLE.get_or_init(|| {
        if let Ok(raw) = std::env::var(KERNEL_ENV) {
            match raw.parse::<Kernel>() {
                Ok(k) if k != Kernel::Auto => {
                    log::debug!("{} pins kernel to {}", KERNEL_ENV, k.to_single());
                    return k.to_single();
                }
                Ok(_) => {}
                Err(e) => log::warn!("ignoring {}: {}", KERNEL_ENV, e),
            }
        }
        Kernel::Scalar
    })
}

#[inline(always)]
pub fn detect_best_batch_kernel() -> Kernel {
    *BEST_BATCH.get_or_init(|| match detect_best_kernel() {
        Kernel::Naive  => Kernel::NaiveBatch,
        Kernel::Scalar => Kernel::ScalarBatch,
        _              => Kernel::ScalarBatch,
    })
}

/// Expands a `(start, end, step)` sweep axis. A zero step or `start == end` yields `start` alone.
#[inline]
pub fn expand_axis((start, end, step): (usize, usize, usize)) -> Vec<usize> {
    if step == 0 || start == end {
        return vec![start];
    }
    (start..=end).step_by(step).collect()
}
