//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: The `Rc<RefCell<T>>` alias through which a polar axes
//!   actor shares the cameras and styles its caller owns.

pub mod aliases;

pub use aliases::*;
