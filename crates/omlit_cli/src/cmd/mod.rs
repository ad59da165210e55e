/// Host value cast command.
pub mod cast;
/// Literal decode command.
pub mod parse;
/// Shape resolution command.
pub mod shape;

mod error;
mod print;
mod schema_file;
mod util;

pub use error::CliError;
