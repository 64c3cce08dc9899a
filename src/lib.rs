//! # multiformats
//!
//! Self-describing identifier formats for content addressing: unsigned
//! varints, multibase text encodings, multihash digests and the CIDs built
//! from them.
//!
//! ```
//! use multiformats::{Cid, bases::BASE58_BTC};
//!
//! let cid: Cid = "QmY7Yh4UquoXHLPFo2XbhXkhBvFoPwmQUSa92pxnxjQuPU".parse().unwrap();
//! let v1 = cid.to_v1();
//! assert_eq!(v1.to_string(), "bafybeierhgbz4zp2x2u67urqrgfnrnlukciupzenpqpipiz5nwtq7uxpx4");
//! assert_eq!(v1.to_string_of_base(&BASE58_BTC).unwrap(), "zdj7WfCo4VYhPH8A3hBXmVDZubFp8TF7VBYLkyfhdMTnAyoZQ");
//! assert_eq!(v1.to_v0().unwrap(), cid);
//! ```
#![deny(
  clippy::missing_errors_doc,
  clippy::missing_panics_doc,
  clippy::missing_safety_doc
)]

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
#[cfg(test)]
extern crate rand;

pub mod bases;
pub mod cid;
pub mod codec;
pub mod error;
pub mod hasher;
pub mod json;
pub mod multihash;
pub mod raw;
pub mod varint;

pub use crate::{
  bases::Registry,
  cid::{
    as_cid,
    AsCid,
    Cid,
    Version,
  },
  codec::{
    Codec,
    Decode,
    Encode,
  },
  error::{
    Error,
    Result,
  },
  hasher::Hasher,
  multihash::Multihash,
};
