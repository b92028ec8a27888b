pub mod bounded_subarray;
pub mod brackets;
pub mod kmp;
pub mod largest_rectangle;
pub use largest_rectangle::{
    largest_rectangle, largest_rectangle_area, LargestRectangleBuilder, LargestRectangleError,
    LargestRectangleInput, LargestRectangleOutput, RectSpan,
};
pub mod min_stack;
pub mod next_greater;
pub mod queue_stack;
pub mod rpn;
pub mod shortest_subarray;
pub mod sliding_max;
pub use sliding_max::{
    max_sliding_window, sliding_max, SlidingMaxBatchBuilder, SlidingMaxBatchOutput, SlidingMaxBatchRange,
    SlidingMaxBuilder, SlidingMaxError, SlidingMaxInput, SlidingMaxOutput, SlidingMaxParams, SlidingMaxStream,
};
pub mod two_stack_queue;
