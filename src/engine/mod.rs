//! Adaptive block-inversion engine.
//!
//! Sweeps a buffer front to back, complementing each block in place. The
//! block widths come from [`plan`]; the kernel that complements them comes
//! from the capability descriptor.

pub mod kernel;
pub mod plan;
pub mod width;

pub use kernel::Backend;
pub use plan::{plan, Block, BlockPlan, PlanSummary};
pub use width::BlockWidth;

use crate::caps::Capabilities;

/// Bitwise NOT every byte of `buffer`, in place
///
/// Applying it twice with the same descriptor restores the input, since
/// the block boundaries depend only on the length and the descriptor.
pub fn invert(buffer: &mut [u8], caps: &Capabilities) {
    let backend = caps.backend();
    for block in plan(buffer.len(), caps) {
        backend.invert(block.width, &mut buffer[block.range()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_invert_empty() {
        let mut buffer: Vec<u8> = Vec::new();
        invert(&mut buffer, &Capabilities::detect());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_invert_eight_bytes_scalar() {
        let mut buffer = vec![0x00, 0xFF, 0x0F, 0xF0, 0x12, 0x34, 0x56, 0x78];
        invert(&mut buffer, &Capabilities::scalar());
        assert_eq!(buffer, vec![0xFF, 0x00, 0xF0, 0x0F, 0xED, 0xCB, 0xA9, 0x87]);
    }

    #[test]
    fn test_invert_thirty_two_bytes_wide() {
        let original = pattern(32);
        let mut buffer = original.clone();
        invert(&mut buffer, &Capabilities::new(true, true));
        let expected: Vec<u8> = original.iter().map(|b| !b).collect();
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_invert_twice_restores() {
        let caps = Capabilities::detect();
        for len in [1, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33, 1000] {
            let original = pattern(len);
            let mut buffer = original.clone();
            invert(&mut buffer, &caps);
            assert_ne!(buffer, original, "length {}", len);
            invert(&mut buffer, &caps);
            assert_eq!(buffer, original, "length {}", len);
        }
    }

    #[test]
    fn test_hardware_matches_synthetic() {
        let detected = Capabilities::detect();
        let synthetic = Capabilities::new(detected.supports128(), detected.supports256());
        let original = pattern(4099);

        let mut hardware = original.clone();
        let mut portable = original.clone();
        invert(&mut hardware, &detected);
        invert(&mut portable, &synthetic);
        assert_eq!(hardware, portable);
    }

    #[test]
    fn test_prefix_only() {
        let mut buffer = vec![0u8; 12];
        invert(&mut buffer[..5], &Capabilities::scalar());
        assert_eq!(&buffer[..5], &[0xFF; 5]);
        assert_eq!(&buffer[5..], &[0u8; 7]);
    }
}
