mod encoded;
mod hash;
pub(crate) mod interface;
mod object_id;
mod ulid;
pub(crate) mod utils;

pub use encoded::*;
pub use hash::*;
pub use interface::Id;
pub use object_id::*;
pub use ulid::*;
