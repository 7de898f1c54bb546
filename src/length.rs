//! Length prefix used in front of byte blobs and strings.
//!
//! The prefix starts one byte wide and escalates through 2, 4 and 8 bytes. Each
//! narrower width reserves its all-ones value as a sentinel meaning "the real
//! length follows in the next width", so a length equal to (or above) the
//! tier limit never fits that tier:
//!
//! | width | fits when          | sentinel      |
//! |-------|--------------------|---------------|
//! | 1     | `len < 0xFF`       | `0xFF`        |
//! | 2     | `len < 0xFFFE`     | `0xFFFF`      |
//! | 4     | `len < 0xFFFFFFFE` | `0xFFFFFFFF`  |
//! | 8     | always             |               |

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
    U64,
}

impl Width {
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    fn read<B: ByteOrder, R: Read + ?Sized>(self, r: &mut R) -> io::Result<u64> {
        match self {
            Self::U8 => r.read_u8().map(u64::from),
            Self::U16 => r.read_u16::<B>().map(u64::from),
            Self::U32 => r.read_u32::<B>().map(u64::from),
            Self::U64 => r.read_u64::<B>(),
        }
    }

    // `v` always fits: it is either below the tier limit or the tier sentinel.
    fn write<B: ByteOrder, W: Write + ?Sized>(self, w: &mut W, v: u64) -> io::Result<()> {
        match self {
            Self::U8 => w.write_u8(v as u8),
            Self::U16 => w.write_u16::<B>(v as u16),
            Self::U32 => w.write_u32::<B>(v as u32),
            Self::U64 => w.write_u64::<B>(v),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    pub width: Width,
    /// Lengths strictly below the limit are written at this width. `None` marks
    /// the terminal tier, which takes any length.
    pub limit: Option<u64>,
    /// Written at this width when the length escalates. Unused on the terminal tier.
    pub sentinel: u64,
}

pub const TIERS: [Tier; 4] = [
    Tier {
        width: Width::U8,
        limit: Some(0xFF),
        sentinel: 0xFF,
    },
    Tier {
        width: Width::U16,
        limit: Some(0xFFFE),
        sentinel: 0xFFFF,
    },
    Tier {
        width: Width::U32,
        limit: Some(0xFFFF_FFFE),
        sentinel: 0xFFFF_FFFF,
    },
    Tier {
        width: Width::U64,
        limit: None,
        sentinel: u64::MAX,
    },
];

/// Index into [`TIERS`] of the tier that finally carries `len`.
pub fn tier_index(len: u64) -> usize {
    TIERS
        .iter()
        .position(|tier| tier.limit.map_or(true, |limit| len < limit))
        .unwrap_or(TIERS.len() - 1)
}

/// Width of the field that carries `len` itself, after any sentinels.
pub fn width_for(len: u64) -> Width {
    TIERS[tier_index(len)].width
}

/// Total number of prefix bytes (sentinels included) written for `len`.
pub fn prefix_len(len: u64) -> usize {
    TIERS[..=tier_index(len)]
        .iter()
        .map(|tier| tier.width.bytes())
        .sum()
}

/// Writes the prefix segment by segment. Stops at the first failed segment.
pub fn write_length<B: ByteOrder, W: Write + ?Sized>(w: &mut W, len: u64) -> io::Result<()> {
    let idx = tier_index(len);
    for tier in &TIERS[..idx] {
        trace!(len, width = ?tier.width, "length prefix escalates");
        tier.width.write::<B, _>(w, tier.sentinel)?;
    }
    TIERS[idx].width.write::<B, _>(w, len)
}

pub fn read_length<B: ByteOrder, R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    let mut len = 0;
    for tier in &TIERS {
        len = tier.width.read::<B, _>(r)?;
        match tier.limit {
            Some(limit) if len >= limit => {
                trace!(value = len, width = ?tier.width, "length prefix escalates");
            }
            _ => break,
        }
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, LittleEndian};
    use hex_literal::hex;

    const BOUNDARIES: [(u64, usize, Width); 9] = [
        (0, 1, Width::U8),
        (254, 1, Width::U8),
        (255, 3, Width::U16),
        (65533, 3, Width::U16),
        (65534, 7, Width::U32),
        (4294967293, 7, Width::U32),
        (4294967294, 15, Width::U64),
        (4294967295, 15, Width::U64),
        (u64::MAX, 15, Width::U64),
    ];

    #[test]
    fn boundaries() {
        for (len, prefix, width) in BOUNDARIES {
            assert_eq!(prefix_len(len), prefix, "len {len}");
            assert_eq!(width_for(len), width, "len {len}");
        }
    }

    #[test]
    fn sentinels_are_width_maxima() {
        for tier in &TIERS[..TIERS.len() - 1] {
            let max = u64::MAX >> (64 - 8 * tier.width.bytes());
            assert_eq!(tier.sentinel, max);
            assert!(tier.limit.unwrap() <= tier.sentinel);
        }
        // 0xFF is both the 1-byte sentinel and the first length that escalates;
        // the wider tiers also reserve sentinel - 1.
        assert_eq!(TIERS[0].limit, Some(TIERS[0].sentinel));
        for tier in &TIERS[1..TIERS.len() - 1] {
            assert_eq!(tier.limit, Some(tier.sentinel - 1));
        }
        assert_eq!(TIERS[TIERS.len() - 1].limit, None);
    }

    fn encode<B: ByteOrder>(len: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_length::<B, _>(&mut out, len).unwrap();
        out
    }

    #[test]
    fn wire_big_endian() {
        for (len, expected) in [
            (0_u64, &hex!("00") as &[u8]),
            (254, &hex!("FE") as &[u8]),
            (255, &hex!("FF 00FF") as &[u8]),
            (65533, &hex!("FF FFFD") as &[u8]),
            (65534, &hex!("FF FFFF 0000FFFE") as &[u8]),
            (4294967293, &hex!("FF FFFF FFFFFFFD") as &[u8]),
            (4294967294, &hex!("FF FFFF FFFFFFFF 00000000FFFFFFFE") as &[u8]),
        ] {
            assert_eq!(encode::<BigEndian>(len), expected, "len {len}");
        }
    }

    #[test]
    fn wire_little_endian() {
        for (len, expected) in [
            (254_u64, &hex!("FE") as &[u8]),
            (255, &hex!("FF FF00") as &[u8]),
            (65533, &hex!("FF FDFF") as &[u8]),
            (65534, &hex!("FF FFFF FEFF0000") as &[u8]),
            (4294967293, &hex!("FF FFFF FDFFFFFF") as &[u8]),
            (4294967294, &hex!("FF FFFF FFFFFFFF FEFFFFFF00000000") as &[u8]),
        ] {
            assert_eq!(encode::<LittleEndian>(len), expected, "len {len}");
        }
    }

    #[test]
    fn read_back() {
        for (len, prefix, _) in BOUNDARIES {
            let wire = encode::<BigEndian>(len);
            assert_eq!(wire.len(), prefix);
            let mut r = wire.as_slice();
            assert_eq!(read_length::<BigEndian, _>(&mut r).unwrap(), len);
            assert!(r.is_empty());

            let wire = encode::<LittleEndian>(len);
            let mut r = wire.as_slice();
            assert_eq!(read_length::<LittleEndian, _>(&mut r).unwrap(), len);
            assert!(r.is_empty());
        }
    }

    #[test]
    fn reserved_value_escalates_on_read() {
        // 0xFFFE in the 2-byte field is not a length, the 4-byte field follows.
        let mut r = &hex!("FF FFFE 00000010") as &[u8];
        assert_eq!(read_length::<BigEndian, _>(&mut r).unwrap(), 0x10);

        // Terminal width is taken as is.
        let mut r = &hex!("FF FFFF FFFFFFFF FFFFFFFFFFFFFFFF") as &[u8];
        assert_eq!(read_length::<BigEndian, _>(&mut r).unwrap(), u64::MAX);
    }

    #[test]
    fn truncated_prefix() {
        for wire in [
            &[] as &[u8],
            &hex!("FF") as &[u8],
            &hex!("FF 00") as &[u8],
            &hex!("FF FFFF 0000") as &[u8],
            &hex!("FF FFFF FFFFFFFF 000000") as &[u8],
        ] {
            let mut r = wire;
            let err = read_length::<BigEndian, _>(&mut r).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        }
    }

    #[test]
    fn write_stops_at_failed_segment() {
        let mut buf = [0_u8; 2];
        let mut w = &mut buf[..];
        // Sentinel fits, the 2-byte field does not.
        assert!(write_length::<BigEndian, _>(&mut w, 300).is_err());
        assert_eq!(buf[0], 0xFF);
    }
}
