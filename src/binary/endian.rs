use std::array::TryFromSliceError;

/// Byte order of a multi-byte integer in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl Endianness {
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endianness = Endianness::Big;
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endianness = Endianness::Little;
}

/// A fixed-width integer that can be decoded from raw bytes
pub trait FromBytes: Sized {
    /// Number of bytes consumed
    const WIDTH: usize;
    /// Name used in error messages
    const NAME: &'static str;

    /// Decode exactly `WIDTH` bytes; any other length is rejected
    fn from_bytes(bytes: &[u8], endianness: Endianness) -> Result<Self, TryFromSliceError>;
}

macro_rules! impl_from_bytes {
    ($($ty:ident),+) => {
        $(
            impl FromBytes for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const NAME: &'static str = stringify!($ty);

                fn from_bytes(
                    bytes: &[u8],
                    endianness: Endianness,
                ) -> Result<Self, TryFromSliceError> {
                    let raw = bytes.try_into()?;
                    Ok(match endianness {
                        Endianness::Big => $ty::from_be_bytes(raw),
                        Endianness::Little => $ty::from_le_bytes(raw),
                    })
                }
            }
        )+
    };
}

impl_from_bytes!(u8, i8, u16, i16, u32, i32, u64, i64);
