//! Data types for the table grid.

mod cell;
mod filter;
mod node;
mod selection;
mod status;
mod table;

pub use cell::*;
pub use filter::*;
pub use node::*;
pub use selection::*;
pub use status::*;
pub use table::*;
