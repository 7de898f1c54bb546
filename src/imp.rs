use super::{error::Result, Decodable, Encodable, Reader, Writer};
use byteorder::ByteOrder;
use bytes::Bytes;
use std::io::{Read, Write};

macro_rules! impl_fixed {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl Encodable for $ty {
                fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
                    out.$write(*self)
                }
            }

            impl Decodable for $ty {
                fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self> {
                    input.$read()
                }
            }
        )*
    };
}

impl_fixed! {
    bool => write_bool, read_bool;
    u8 => write_u8, read_u8;
    i8 => write_i8, read_i8;
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}

impl Encodable for [u8] {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        out.write_bytes_with_length_prefix(self)
    }
}

impl Encodable for Vec<u8> {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        self.as_slice().encode(out)
    }
}

impl Decodable for Vec<u8> {
    fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self> {
        input.read_bytes_with_length_prefix()
    }
}

impl Encodable for Bytes {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        (**self).encode(out)
    }
}

impl Decodable for Bytes {
    fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self> {
        input.read_bytes_with_length_prefix().map(Bytes::from)
    }
}

/// Fixed-size arrays carry no prefix, their length is known to both sides.
impl<const LEN: usize> Encodable for [u8; LEN] {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        out.write_bytes(self)
    }
}

impl<const LEN: usize> Decodable for [u8; LEN] {
    fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self> {
        input.read_array()
    }
}

impl Encodable for str {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        out.write_string(self)
    }
}

impl Encodable for String {
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        out.write_string(self)
    }
}

impl Decodable for String {
    fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self> {
        input.read_string()
    }
}

impl<T> Encodable for Option<T>
where
    T: Encodable,
{
    fn encode<B: ByteOrder, W: Write>(&self, out: &mut Writer<B, W>) -> Result<()> {
        if let Some(v) = self {
            out.write_bool(true)?;
            v.encode(out)
        } else {
            out.write_bool(false)
        }
    }
}

impl<T> Decodable for Option<T>
where
    T: Decodable,
{
    fn decode<B: ByteOrder, R: Read>(input: &mut Reader<B, R>) -> Result<Self> {
        Ok(if input.read_bool()? {
            Some(T::decode(input)?)
        } else {
            None
        })
    }
}

#[macro_export]
macro_rules! impl_encodable_for_wrapper {
    ($wrapper:ty, $base:ty) => {
        impl $crate::Encodable for $wrapper {
            fn encode<B: $crate::ByteOrder, W: ::std::io::Write>(
                &self,
                out: &mut $crate::Writer<B, W>,
            ) -> $crate::Result<()> {
                $crate::Encodable::encode(&self.0, out)
            }
        }

        impl $crate::Decodable for $wrapper {
            fn decode<B: $crate::ByteOrder, R: ::std::io::Read>(
                input: &mut $crate::Reader<B, R>,
            ) -> $crate::Result<Self> {
                <$base as $crate::Decodable>::decode(input).map(<$wrapper>::from)
            }
        }
    };
}
