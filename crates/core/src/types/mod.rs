pub mod method_name;
pub mod post_ref;

pub use method_name::{MethodName, MethodNameError};
pub use post_ref::{PostRef, PostRefError};
