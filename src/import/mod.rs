//! Bank export import: encoding detection, column resolution and row reading

pub mod encoding;
pub mod reader;
pub mod schema;

pub use encoding::*;
pub use reader::*;
pub use schema::*;
