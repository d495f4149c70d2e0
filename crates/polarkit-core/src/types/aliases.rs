//! Type aliases for shared, caller-owned collaborators.
//!
//! A polar axes actor never owns its camera or its text and line styles:
//! the caller creates them, may hand the same object to several actors,
//! and keeps mutating it between frames. Everything runs on the render
//! thread, so the sharing is single-threaded `Rc<RefCell<T>>`.
//!
//! ## Usage
//!
//! ```rust
//! use polarkit_core::types::*;
//!
//! let width: Shared<f64> = shared(1.0);
//! let alias = width.clone();
//! *alias.borrow_mut() = 2.0;
//! assert_eq!(*width.borrow(), 2.0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Unsized targets work too, so `Shared<dyn Camera>` holds any camera.
pub type Shared<T> = Rc<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// True when both handles point at the same allocation.
///
/// Works for unsized targets by comparing data pointers only.
#[inline]
pub fn same_shared<T: ?Sized, U: ?Sized>(a: &Rc<RefCell<T>>, b: &Rc<RefCell<U>>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
