use super::{error::Result, Decodable, Encodable, Reader, Writer};
use byteorder::ByteOrder;

/// Encodes `v` into a fresh buffer.
pub fn serialize<B, T>(v: &T) -> Result<Vec<u8>>
where
    B: ByteOrder,
    T: Encodable + ?Sized,
{
    let mut w = Writer::<B, _>::new(Vec::new());
    v.encode(&mut w)?;
    Ok(w.into_inner())
}

/// Decodes a `T` from the front of `input`. Trailing bytes are ignored.
pub fn deserialize<B, T>(input: &[u8]) -> Result<T>
where
    B: ByteOrder,
    T: Decodable,
{
    T::decode(&mut Reader::<B, _>::new(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BigEndian, LittleEndian, NetworkEndian};
    use hex_literal::hex;

    #[test]
    fn empty_input() {
        assert!(deserialize::<BigEndian, u8>(&[]).unwrap_err().is_short_read());
        assert!(deserialize::<BigEndian, String>(&[])
            .unwrap_err()
            .is_short_read());
    }

    #[test]
    fn trailing_bytes() {
        assert_eq!(deserialize::<LittleEndian, u16>(&hex!("0100 FF")).unwrap(), 1);
    }

    #[test]
    fn network_order_is_big_endian() {
        assert_eq!(
            serialize::<NetworkEndian, _>(&0x0102_0304_u32).unwrap(),
            serialize::<BigEndian, _>(&0x0102_0304_u32).unwrap()
        );
        assert_eq!(
            serialize::<BigEndian, _>(&0x0102_0304_u32).unwrap(),
            hex!("01020304")
        );
    }
}
