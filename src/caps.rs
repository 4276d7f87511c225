//! Capability descriptor.
//!
//! Records which block widths may use a vector register on this machine.
//! The scalar widths (1, 2, 4, 8 bytes) are always usable. Built once at
//! startup and passed into the engine by value; nothing here is global.

use crate::engine::{Backend, BlockWidth};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    supports128: bool,
    supports256: bool,
    /// Upper bound requested by configuration, independent of hardware
    ceiling: BlockWidth,
    #[serde(skip)]
    backend: Backend,
}

impl Capabilities {
    /// Query the executing CPU for vector extensions
    pub fn detect() -> Self {
        probe()
    }

    /// Scalar widths only
    pub const fn scalar() -> Self {
        Self {
            supports128: false,
            supports256: false,
            ceiling: BlockWidth::W32,
            backend: Backend::Portable,
        }
    }

    /// Synthetic descriptor, independent of the running hardware
    ///
    /// Enabled vector widths are served by the portable kernel, so the
    /// result is byte-identical to a hardware descriptor with the same
    /// flags. A 256-bit register implies a 128-bit one.
    pub const fn new(supports128: bool, supports256: bool) -> Self {
        Self {
            supports128: supports128 || supports256,
            supports256,
            ceiling: BlockWidth::W32,
            backend: Backend::Portable,
        }
    }

    /// Cap the widest block at `max`, never raising what the CPU offers
    pub fn restrict(self, max: BlockWidth) -> Self {
        Self {
            supports128: self.supports128 && max >= BlockWidth::W16,
            supports256: self.supports256 && max >= BlockWidth::W32,
            ceiling: self.ceiling.min(max),
            backend: self.backend,
        }
    }

    pub const fn supports128(&self) -> bool {
        self.supports128
    }

    pub const fn supports256(&self) -> bool {
        self.supports256
    }

    /// Largest usable block in bytes: 32, 16 or 8 (lower when restricted)
    pub fn max_step_width(&self) -> usize {
        self.max_width().bytes()
    }

    pub fn max_width(&self) -> BlockWidth {
        let hardware = if self.supports256 {
            BlockWidth::W32
        } else if self.supports128 {
            BlockWidth::W16
        } else {
            BlockWidth::SCALAR_MAX
        };
        hardware.min(self.ceiling)
    }

    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Names of the vector extensions this descriptor will use
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        match self.backend {
            Backend::Portable => {}
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 | Backend::Avx2 => {
                if self.supports128 {
                    names.push("sse2");
                }
                if self.supports256 {
                    names.push("avx2");
                }
            }
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => {
                if self.supports128 {
                    names.push("neon");
                }
            }
        }
        names
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(target_arch = "x86_64")]
fn probe() -> Capabilities {
    let sse2 = std::arch::is_x86_feature_detected!("sse2");
    let avx2 = std::arch::is_x86_feature_detected!("avx2");

    let backend = if avx2 {
        Backend::Avx2
    } else if sse2 {
        Backend::Sse2
    } else {
        Backend::Portable
    };

    Capabilities {
        supports128: sse2 || avx2,
        supports256: avx2,
        ceiling: BlockWidth::W32,
        backend,
    }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> Capabilities {
    let neon = std::arch::is_aarch64_feature_detected!("neon");

    Capabilities {
        supports128: neon,
        supports256: false,
        ceiling: BlockWidth::W32,
        backend: if neon { Backend::Neon } else { Backend::Portable },
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> Capabilities {
    Capabilities::scalar()
}
