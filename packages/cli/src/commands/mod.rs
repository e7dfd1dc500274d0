pub mod init;
pub mod new;
pub mod outline;
pub mod validate;

pub use init::{init, InitArgs};
pub use new::{new_course, NewArgs};
pub use outline::{outline, OutlineArgs};
pub use validate::{validate, ValidateArgs};
