use super::{
    chain::Chain,
    error::{Error, Result},
    length, Decodable,
};
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use std::{io::Read, marker::PhantomData};
use tracing::trace;

// Upper bound on what a blob read reserves before any bytes arrive.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Decodes values from the front of a byte source.
///
/// The byte order is part of the type, so a reader never switches order
/// mid-stream. Pass `&mut source` to keep ownership of the source.
#[derive(Debug)]
pub struct Reader<B, R> {
    inner: R,
    order: PhantomData<B>,
}

pub type BeReader<R> = Reader<BigEndian, R>;
pub type LeReader<R> = Reader<LittleEndian, R>;

impl<B: ByteOrder, R: Read> Reader<B, R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            order: PhantomData,
        }
    }

    /// Starts a fetch chain: every `fetch_*` stores into a caller slot and the
    /// first failure stops all later reads.
    pub fn chain(&mut self) -> Chain<'_, Self> {
        Chain::new(self)
    }

    /// Any byte other than `1` decodes as `false`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? == 1)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.inner.read_u8().map_err(Error::short_read)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.inner.read_i8().map_err(Error::short_read)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.inner.read_u16::<B>().map_err(Error::short_read)
    }

    pub fn read_ushort(&mut self) -> Result<u16> {
        self.read_u16()
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.inner.read_i16::<B>().map_err(Error::short_read)
    }

    pub fn read_short(&mut self) -> Result<i16> {
        self.read_i16()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.inner.read_u32::<B>().map_err(Error::short_read)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.inner.read_i32::<B>().map_err(Error::short_read)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.inner.read_u64::<B>().map_err(Error::short_read)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.inner.read_i64::<B>().map_err(Error::short_read)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_u64().map(f64::from_bits)
    }

    /// Reads exactly `n` raw bytes.
    ///
    /// The buffer grows with the data actually delivered, so a huge `n` against
    /// a short source fails with [`Error::ShortRead`] instead of allocating up front.
    pub fn read_bytes(&mut self, n: u64) -> Result<Vec<u8>> {
        let cap = usize::try_from(n).map_or(PREALLOC_LIMIT, |n| n.min(PREALLOC_LIMIT));
        let mut buf = Vec::with_capacity(cap);
        (&mut self.inner)
            .take(n)
            .read_to_end(&mut buf)
            .map_err(Error::short_read)?;

        let got = buf.len() as u64;
        if got != n {
            return Err(Error::short(n, got));
        }
        Ok(buf)
    }

    /// Reads exactly `N` raw bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0; N];
        self.inner.read_exact(&mut buf).map_err(Error::short_read)?;
        Ok(buf)
    }

    /// Reads the length prefix only.
    pub fn read_length(&mut self) -> Result<u64> {
        length::read_length::<B, _>(&mut self.inner).map_err(Error::short_read)
    }

    pub fn read_bytes_with_length_prefix(&mut self) -> Result<Vec<u8>> {
        let len = self.read_length()?;
        trace!(len, "reading length-prefixed blob");
        self.read_bytes(len)
    }

    /// Length-prefixed UTF-8 text.
    ///
    /// Invalid sequences are not rejected, but a `String` cannot carry them:
    /// each one comes back as U+FFFD and the original bytes are lost. Use
    /// [`Reader::read_bytes_with_length_prefix`] when the exact bytes matter;
    /// [`Writer::write_bytes_with_length_prefix`](crate::Writer::write_bytes_with_length_prefix)
    /// puts them back on the wire unchanged.
    pub fn read_string(&mut self) -> Result<String> {
        let buf = self.read_bytes_with_length_prefix()?;
        Ok(String::from_utf8(buf)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    pub fn read<T: Decodable>(&mut self) -> Result<T> {
        T::decode(self)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

macro_rules! fetch_methods {
    ($($fetch:ident => $read:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $fetch(self, out: &mut $ty) -> Self {
                self.and_then(|r| {
                    *out = r.$read()?;
                    Ok(())
                })
            }
        )*
    };
}

impl<'a, B: ByteOrder, R: Read> Chain<'a, Reader<B, R>> {
    fetch_methods! {
        fetch_bool => read_bool: bool,
        fetch_u8 => read_u8: u8,
        fetch_i8 => read_i8: i8,
        fetch_u16 => read_u16: u16,
        fetch_ushort => read_ushort: u16,
        fetch_i16 => read_i16: i16,
        fetch_short => read_short: i16,
        fetch_u32 => read_u32: u32,
        fetch_i32 => read_i32: i32,
        fetch_u64 => read_u64: u64,
        fetch_i64 => read_i64: i64,
        fetch_f32 => read_f32: f32,
        fetch_f64 => read_f64: f64,
        fetch_bytes_with_length_prefix => read_bytes_with_length_prefix: Vec<u8>,
        fetch_string => read_string: String,
    }

    pub fn fetch_bytes(self, out: &mut Vec<u8>, n: u64) -> Self {
        self.and_then(|r| {
            *out = r.read_bytes(n)?;
            Ok(())
        })
    }

    pub fn fetch<T: Decodable>(self, out: &mut T) -> Self {
        self.and_then(|r| {
            *out = r.read()?;
            Ok(())
        })
    }
}
