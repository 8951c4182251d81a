pub mod helper;

mod ring_buffer;
pub use ring_buffer::RingBuffer;

mod window_counts;
pub use window_counts::WindowCounts;

mod monotonic_queue;
pub use monotonic_queue::{Max, Min, MonotonicQueue};

mod rb_tree;
pub use rb_tree::RbTree;

mod odometer;
pub use odometer::Odometer;
