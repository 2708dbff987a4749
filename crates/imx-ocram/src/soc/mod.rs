// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform descriptors.
//!
//! Everything SoC-specific the partitioning code needs is collected in one
//! [`PlatformDescriptor`] value: the apertures to map, the partition
//! register layout, the fixed boundary used without a device tree, and the
//! handoff requests. Only [`IMX7`] ships; tests build their own.

mod imx7;


pub use imx7::IMX7;

use imx_ocram_abi::layout::PAGE_SHIFT;
use imx_ocram_abi::{Aperture, HandoffRequest, Paddr};

/// Bit layout of the register holding the OCRAM secure/non-secure split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GprLayout {
    /// Physical base of the general purpose register block.
    pub base: Paddr,
    /// Size of the register block, as mapped.
    pub size: u32,
    /// Byte offset of the partition register inside the block.
    pub offset: u32,
    /// Mask of the boundary address field.
    pub addr_mask: u32,
    /// Position of the boundary address field.
    pub addr_shift: u32,
    /// Enable bit of the secure partition.
    pub enable: u32,
    /// Distance between a protected bit and its lock bit.
    pub lock_shift: u32,
}

impl GprLayout {
    /// Bits covered by the lock: address field and enable bit.
    #[inline]
    #[must_use]
    pub const fn protected_mask(&self) -> u32 {
        self.addr_mask | self.enable
    }

    /// Lock bits freezing [`Self::protected_mask`].
    #[inline]
    #[must_use]
    pub const fn lock_bits(&self) -> u32 {
        self.protected_mask() << self.lock_shift
    }

    /// Returns true if any lock bit is already set in `value`.
    #[inline]
    #[must_use]
    pub const fn is_locked(&self, value: u32) -> bool {
        value & self.lock_bits() != 0
    }

    /// `current` with the address field replaced by `boundary` (in pages)
    /// and the enable bit set. Lock bits are left untouched.
    #[inline]
    #[must_use]
    pub const fn configure(&self, current: u32, boundary: Paddr) -> u32 {
        let field = ((boundary.as_u32() >> PAGE_SHIFT) << self.addr_shift) & self.addr_mask;
        (current & !self.addr_mask) | field | self.enable
    }

    /// Physical address of the partition register.
    #[inline]
    #[must_use]
    pub const fn register(&self) -> Paddr {
        self.base.add(self.offset)
    }
}

/// Static description of one SoC.
#[derive(Clone, Copy, Debug)]
pub struct PlatformDescriptor {
    /// Human-readable platform name.
    pub name: &'static str,
    /// Peripheral apertures mapped as secure device memory.
    pub apertures: &'static [Aperture],
    /// Boundary used when no secure-SRAM node decides it.
    pub default_boundary: Paddr,
    /// Offset of the TLB scratch buffer from the boundary.
    pub tlb_offset: u32,
    /// Interrupt controller distributor.
    pub gic: Aperture,
    /// External DRAM. Never mapped.
    pub dram: Aperture,
    /// Partition register.
    pub gpr: GprLayout,
    /// Compatible strings whose nodes live in secure OCRAM.
    pub secure_sram: &'static [&'static str],
    /// Property rewrites for the non-secure OS.
    pub handoff: &'static [HandoffRequest],
}

impl PlatformDescriptor {
    /// Physical address of the TLB scratch buffer for `boundary`.
    #[inline]
    #[must_use]
    pub const fn tlb_phys(&self, boundary: Paddr) -> Paddr {
        boundary.add(self.tlb_offset)
    }

    /// First aperture that overlaps DRAM, if any.
    #[must_use]
    pub fn dram_overlap(&self) -> Option<&Aperture> {
        self.apertures
            .iter()
            .chain(core::iter::once(&self.gic))
            .find(|aperture| aperture.overlaps(&self.dram))
    }
}
