mod fast_random;
mod interface;
mod thread_random;

pub use fast_random::*;
pub use interface::*;
pub use thread_random::*;
