//! Block inverters.
//!
//! Widths up to 8 bytes are complemented through the matching unsigned
//! integer in native byte order. The 16 and 32 byte widths go through a
//! vector register when the probe found one, and otherwise through repeated
//! 8 byte complements. Both routes produce the same bytes.

use super::width::BlockWidth;
use std::ops::Not;

/// Hardware route for the vector widths
///
/// Only [`Capabilities::detect`](crate::caps::Capabilities::detect) hands out
/// anything other than `Portable`, so holding a vector backend means the
/// running CPU advertised the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Portable,
    #[cfg(target_arch = "x86_64")]
    Sse2,
    #[cfg(target_arch = "x86_64")]
    Avx2,
    #[cfg(target_arch = "aarch64")]
    Neon,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => "sse2",
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => "avx2",
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => "neon",
        }
    }

    /// Complement every byte of `block`, which must be exactly `width` long
    pub(crate) fn invert(self, width: BlockWidth, block: &mut [u8]) {
        debug_assert_eq!(block.len(), width.bytes());
        match width {
            BlockWidth::W1 => complement::<u8>(block),
            BlockWidth::W2 => complement::<u16>(block),
            BlockWidth::W4 => complement::<u32>(block),
            BlockWidth::W8 => complement::<u64>(block),
            BlockWidth::W16 => self.invert_128(block),
            BlockWidth::W32 => self.invert_256(block),
        }
    }

    fn invert_128(self, block: &mut [u8]) {
        match self {
            #[cfg(target_arch = "x86_64")]
            // SAFETY: SSE2 was reported by the CPU (and AVX2 implies it)
            Backend::Sse2 | Backend::Avx2 => unsafe { x86::invert_128(block) },
            #[cfg(target_arch = "aarch64")]
            // SAFETY: NEON was reported by the CPU
            Backend::Neon => unsafe { neon::invert_128(block) },
            Backend::Portable => complement::<u64>(block),
        }
    }

    fn invert_256(self, block: &mut [u8]) {
        match self {
            #[cfg(target_arch = "x86_64")]
            // SAFETY: AVX2 was reported by the CPU
            Backend::Avx2 => unsafe { x86::invert_256(block) },
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => {
                let (lo, hi) = block.split_at_mut(16);
                // SAFETY: SSE2 was reported by the CPU
                unsafe {
                    x86::invert_128(lo);
                    x86::invert_128(hi);
                }
            }
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => {
                let (lo, hi) = block.split_at_mut(16);
                // SAFETY: NEON was reported by the CPU
                unsafe {
                    neon::invert_128(lo);
                    neon::invert_128(hi);
                }
            }
            Backend::Portable => complement::<u64>(block),
        }
    }
}

/// Fixed-width unsigned integer a block can be loaded into
pub(crate) trait Word: Copy + Not<Output = Self> {
    const BYTES: usize;

    fn load(bytes: &[u8]) -> Self;
    fn store(self, bytes: &mut [u8]);
}

macro_rules! impl_word {
    ($($ty:ty),*) => {$(
        impl Word for $ty {
            const BYTES: usize = std::mem::size_of::<$ty>();

            #[inline(always)]
            fn load(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline(always)]
            fn store(self, bytes: &mut [u8]) {
                bytes.copy_from_slice(&self.to_ne_bytes());
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64);

/// Bitwise NOT over `block`, one `W` at a time
///
/// `block.len()` must be a multiple of `W::BYTES`.
#[inline(always)]
pub(crate) fn complement<W: Word>(block: &mut [u8]) {
    debug_assert_eq!(block.len() % W::BYTES, 0);
    for chunk in block.chunks_exact_mut(W::BYTES) {
        (!W::load(chunk)).store(chunk);
    }
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::*;

    /// # Safety
    /// SSE2 must be available and `block` must be 16 bytes.
    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn invert_128(block: &mut [u8]) {
        debug_assert_eq!(block.len(), 16);
        let ptr = block.as_mut_ptr() as *mut __m128i;
        let data = _mm_loadu_si128(ptr);
        let ones = _mm_set1_epi8(-1);
        _mm_storeu_si128(ptr, _mm_xor_si128(data, ones));
    }

    /// # Safety
    /// AVX2 must be available and `block` must be 32 bytes.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn invert_256(block: &mut [u8]) {
        debug_assert_eq!(block.len(), 32);
        let ptr = block.as_mut_ptr() as *mut __m256i;
        let data = _mm256_loadu_si256(ptr);
        let ones = _mm256_set1_epi8(-1);
        _mm256_storeu_si256(ptr, _mm256_xor_si256(data, ones));
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use std::arch::aarch64::*;

    /// # Safety
    /// NEON must be available and `block` must be 16 bytes.
    #[target_feature(enable = "neon")]
    pub(super) unsafe fn invert_128(block: &mut [u8]) {
        debug_assert_eq!(block.len(), 16);
        let ptr = block.as_mut_ptr();
        let data = vld1q_u8(ptr);
        vst1q_u8(ptr, vmvnq_u8(data));
    }
}
