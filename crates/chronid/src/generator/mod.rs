mod global;
mod object_id;
mod ulid;

pub use global::*;
pub use object_id::*;
pub use ulid::*;
