//! Endianness-aware binary streams.
//!
//! [`Reader`] and [`Writer`] move booleans, fixed-width integers, IEEE floats,
//! raw bytes and length-prefixed blobs/strings over any [`std::io::Read`] /
//! [`std::io::Write`]. The byte order is a type parameter ([`BigEndian`] or
//! [`LittleEndian`]). Blob lengths use the escalating prefix described in
//! [`length`].
//!
//! ```
//! use binstream::{BeReader, BeWriter};
//!
//! let mut w = BeWriter::new(Vec::new());
//! w.chain().write_u16(10).write_string("golang").finish()?;
//! let buf = w.into_inner();
//! assert_eq!(buf, b"\x00\x0a\x06golang");
//!
//! let mut r = BeReader::new(buf.as_slice());
//! let (mut n, mut s) = (0, String::new());
//! r.chain().fetch_u16(&mut n).fetch_string(&mut s).finish()?;
//! assert_eq!((n, s.as_str()), (10, "golang"));
//! # Ok::<(), binstream::Error>(())
//! ```

mod binary;
mod chain;
mod error;
mod imp;
pub mod length;
mod reader;
mod writer;

pub use self::{
    binary::{deserialize, serialize},
    chain::Chain,
    error::{Error, Result},
    reader::{BeReader, LeReader, Reader},
    writer::{BeWriter, LeWriter, Writer},
};
use auto_impl::auto_impl;
#[cfg(feature = "derive")]
pub use binstream_derive::*;
pub use byteorder::{BigEndian, ByteOrder, LittleEndian, NetworkEndian};
use std::io::{Read, Write};

#[auto_impl(&, Box, Arc)]
pub trait Encodable {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()>;
}

pub trait Decodable: Sized {
    fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self>;
}
