#![allow(clippy::needless_range_loop)]

pub mod scanners;
pub mod utilities;
