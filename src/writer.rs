use super::{
    chain::Chain,
    error::{Error, Result},
    length, Encodable,
};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use std::{
    io::{self, Write},
    marker::PhantomData,
};
use tracing::{debug, trace};

/// Encodes values into a byte sink.
///
/// Every operation hands its bytes to the sink with `write_all`; a rejected
/// write surfaces as [`Error::SinkFailure`]. The first failure is kept: from
/// then on every operation, direct or chained, returns that same error and
/// the sink is not touched again.
#[derive(Debug)]
pub struct Writer<B, W> {
    inner: W,
    failed: Option<Error>,
    order: PhantomData<B>,
}

pub type BeWriter<W> = Writer<BigEndian, W>;
pub type LeWriter<W> = Writer<LittleEndian, W>;

impl<B: ByteOrder, W: Write> Writer<B, W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            failed: None,
            order: PhantomData,
        }
    }

    /// Runs one sink operation unless an earlier one already failed.
    fn guarded<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        if let Some(e) = &self.failed {
            trace!(error = %e, "sink already failed, skipping write");
            return Err(e.clone());
        }
        match op(&mut self.inner) {
            Ok(()) => Ok(()),
            Err(e) => {
                let e = Error::sink_failure(e);
                debug!(error = %e, "writer latched sink failure");
                self.failed = Some(e.clone());
                Err(e)
            }
        }
    }

    /// The first sink failure, if any write has failed.
    pub fn error(&self) -> Option<&Error> {
        self.failed.as_ref()
    }

    pub fn chain(&mut self) -> Chain<'_, Self> {
        Chain::new(self)
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_u8(u8::from(v))
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.guarded(|w| w.write_u8(v))
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.guarded(|w| w.write_i8(v))
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.guarded(|w| w.write_u16::<B>(v))
    }

    pub fn write_ushort(&mut self, v: u16) -> Result<()> {
        self.write_u16(v)
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.guarded(|w| w.write_i16::<B>(v))
    }

    pub fn write_short(&mut self, v: i16) -> Result<()> {
        self.write_i16(v)
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.guarded(|w| w.write_u32::<B>(v))
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.guarded(|w| w.write_i32::<B>(v))
    }

    pub fn write_u64(&mut self, v: u64) -> Result<()> {
        self.guarded(|w| w.write_u64::<B>(v))
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.guarded(|w| w.write_i64::<B>(v))
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        self.write_u32(v.to_bits())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        self.write_u64(v.to_bits())
    }

    /// Writes the bytes verbatim, without a length prefix.
    pub fn write_bytes(&mut self, v: &[u8]) -> Result<()> {
        self.guarded(|w| w.write_all(v))
    }

    pub fn write_length(&mut self, len: u64) -> Result<()> {
        self.guarded(|w| length::write_length::<B, _>(w, len))
    }

    /// Length prefix followed by the payload. Nothing after a failed segment
    /// reaches the sink.
    pub fn write_bytes_with_length_prefix(&mut self, v: &[u8]) -> Result<()> {
        trace!(len = v.len(), "writing length-prefixed blob");
        self.write_length(v.len() as u64)?;
        self.write_bytes(v)
    }

    pub fn write_string(&mut self, v: &str) -> Result<()> {
        self.write_bytes_with_length_prefix(v.as_bytes())
    }

    pub fn write<T: Encodable + ?Sized>(&mut self, v: &T) -> Result<()> {
        v.encode(self)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.guarded(|w| w.flush())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

macro_rules! chain_methods {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $method(self, v: $ty) -> Self {
                self.and_then(|w| w.$method(v))
            }
        )*
    };
}

impl<'a, B: ByteOrder, W: Write> Chain<'a, Writer<B, W>> {
    chain_methods! {
        write_bool: bool,
        write_u8: u8,
        write_i8: i8,
        write_u16: u16,
        write_ushort: u16,
        write_i16: i16,
        write_short: i16,
        write_u32: u32,
        write_i32: i32,
        write_u64: u64,
        write_i64: i64,
        write_f32: f32,
        write_f64: f64,
        write_bytes: &[u8],
        write_length: u64,
        write_bytes_with_length_prefix: &[u8],
        write_string: &str,
    }

    pub fn write<T: Encodable + ?Sized>(self, v: &T) -> Self {
        self.and_then(|w| w.write(v))
    }

    pub fn flush(self) -> Self {
        self.and_then(|w| w.flush())
    }
}
