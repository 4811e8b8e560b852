#![no_std]

//! `arraykit`: a growable array and a fixed-capacity ring buffer over raw memory.
//!
//! [`DynArray`] is a contiguous, growable array that obtains its storage from a
//! pluggable [`Allocator`] (the global heap by default). [`RingBuffer`] is a
//! fixed-capacity circular queue stored inline that overwrites its oldest
//! element once full. Both expose random-access [`Cursor`]s in forward and
//! reverse direction, and ordinary Rust iterators.
//!
//! # Growth policy
//!
//! When a `DynArray` is full, pushing one element grows the capacity to
//! `max(1, ceil(β × capacity))` with β = 3/2 ([`GROWTH_NUMERATOR`] /
//! [`GROWTH_DENOMINATOR`]). Inserting `n` elements that do not fit grows it to
//! `ceil(β × (len + n))`. `reserve(n)` and growing `resize(n, ..)` allocate
//! exactly `n` slots. `new()` starts at [`DEFAULT_CAPACITY`].
//!
//! ```
//! # use arraykit::DynArray;
//! let mut numbers = DynArray::new().unwrap();
//! assert_eq!(numbers.capacity(), 10);
//!
//! for n in 0..11 {
//!     numbers.push_back(n).unwrap();
//! }
//! assert_eq!(numbers.len(), 11);
//! assert_eq!(numbers.capacity(), 15);
//! ```
//!
//! # Failure model
//!
//! Every operation that may allocate returns `Result<_, ArrayError>`. A failed
//! reallocation leaves the array exactly as it was: the new block is acquired
//! first, the elements are moved bitwise into it, and only then is the old
//! block released.
//!
//! ```
//! # use arraykit::{ArrayError, DynArray};
//! let numbers = DynArray::from_slice(&[1, 2, 3]).unwrap();
//! assert_eq!(numbers.at(1), Ok(&2));
//! assert_eq!(numbers.at(3), Err(ArrayError::OutOfRange { index: 3, len: 3 }));
//! ```
//!
//! # Cursors
//!
//! Cursors compare by position, never by the values under them:
//!
//! ```
//! # use arraykit::DynArray;
//! let words = DynArray::from_slice(&["a", "b", "a"]).unwrap();
//! let first = words.begin();
//! let third = first + 2;
//!
//! assert_eq!(first.get(), third.get());
//! assert_ne!(first, third);
//! assert!(first < third);
//! assert_eq!(third.offset_from(&first), 2);
//! ```
//!
//! Reverse cursors start at the last element:
//!
//! ```
//! # use arraykit::DynArray;
//! let numbers = DynArray::from_slice(&[1, 2, 3]).unwrap();
//! let backwards: Vec<_> = numbers.rbegin().to(numbers.rend()).copied().collect();
//! assert_eq!(backwards, [3, 2, 1]);
//! ```
//!
//! # Ring buffer
//!
//! ```
//! # use arraykit::RingBuffer;
//! let mut recent: RingBuffer<u32, 3> = RingBuffer::new();
//! for n in 1..=4 {
//!     recent.push_back(n);
//! }
//! // 1 was overwritten
//! assert_eq!(recent.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
//! assert_eq!(recent.pop_front(), Some(2));
//! assert_eq!(recent.len(), 2);
//! ```
//!
//! ## `no_std` Compatibility
//!
//! The crate uses only `core` and `alloc`. [`ArrayError`] implements
//! `core::error::Error`, and therefore `std::error::Error`, in every
//! configuration. The `std` feature only forwards to `thiserror/std`:
//! ```toml
//! [dependencies]
//! arraykit = { version = "0.1", features = ["std"] }
//! ```
//!
//! Diagnostics go through the [`log`] facade: reallocations at `trace`,
//! allocation failures at `debug`.

extern crate alloc;

mod allocator;
mod cursor;
mod dynarray;
mod error;
mod iter;
mod macros;
mod raw;
mod ring;

pub use allocator::{Allocator, Global};
pub use cursor::{Cursor, CursorMut, Direction, Forward, Reverse};
pub use dynarray::{DynArray, DEFAULT_CAPACITY, GROWTH_DENOMINATOR, GROWTH_NUMERATOR};
pub use error::ArrayError;
pub use iter::{IntoIter, Iter, IterMut, RingIntoIter};
pub use ring::RingBuffer;
