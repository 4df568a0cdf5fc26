//! A growable array built on a single-ownership heap buffer.
//!
//! [`ScopedArray`] owns one raw allocation and nothing else; [`ArrayList`]
//! layers a length and a doubling growth policy on top of it.

mod array_list;
mod scoped_array;

pub(crate) mod errors;
pub mod tracker;

pub use array_list::ArrayList;
pub use errors::{AllocErr, OutOfRange};
pub use scoped_array::{RawParts, ScopedArray};
