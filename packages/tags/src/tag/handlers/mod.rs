//! Built-in tag handlers.

mod date;
mod fallback;
mod include;

pub use date::*;
pub use fallback::*;
pub use include::*;
