//! Command implementations for the CLI.

pub mod analyze;
pub mod compress;
pub mod decompress;
pub mod detect;
pub mod verify;

pub use analyze::cmd_analyze;
pub use compress::{CompressOptions, cmd_compress};
pub use decompress::cmd_decompress;
pub use detect::cmd_detect;
pub use verify::cmd_verify;
