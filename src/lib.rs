//! # pglz
//!
//! `pglz` is a safe, pure-Rust implementation of the LZ77-family
//! compression codec used inside PostgreSQL for TOAST and WAL payloads.
//!
//! The compressed stream is a sequence of groups, each one control byte
//! followed by up to 8 items. A clear control bit means a literal byte; a
//! set bit means a 2- or 3-byte back-reference tag (offset up to 4095,
//! length up to 273) copied out of the output produced so far, including
//! bytes the copy itself is producing.
//!
//! Compression is governed by a [`Strategy`]: input-size bounds, a minimum
//! compression rate, and an early give-up budget. A compressor that cannot
//! meet the strategy returns [`Incompressible`] and the caller stores the
//! data raw; that framing is the caller's job, not this crate's.
//!
//! ## Example
//!
//! ```rust
//! extern crate alloc;
//! use alloc::vec::Vec;
//! use pglz::decompress;
//!
//! // Control byte 0x02: first item a literal, second a back-reference.
//! // The tag (offset 1, length 3) re-reads the 'A' it keeps appending.
//! let compressed = [0x02, b'A', 0x00, 0x01];
//!
//! let mut buffer = Vec::new();
//! decompress(&compressed, 4, &mut buffer, true).expect("Decompression failed");
//! assert_eq!(buffer, b"AAAA");
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod compress;
pub mod decompress;
pub mod error;
pub mod strategy;

mod history;
mod tag;

pub use compress::{compress, compress_with_strategy, max_compressed_len};
pub use decompress::decompress;
pub use error::{DecompressionError, Incompressible};
pub use strategy::Strategy;
