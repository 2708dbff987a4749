// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Volatile MMIO backend.
//!
//! Register and memory accesses go straight to the virtual address handed
//! out by the monitor's address-mapping service, which this backend only
//! borrows as a function pointer.

use imx_ocram_abi::{AreaType, Paddr, Vaddr};

use super::traits::{MemorySpace, Platform};

/// Address-mapping service of the surrounding monitor.
pub type PhysToVirt = fn(Paddr, AreaType, u32) -> Option<Vaddr>;

/// Direct hardware access through the monitor's static mappings.
pub struct Mmio {
    phys_to_virt: PhysToVirt,
}

impl Mmio {
    /// Create the backend.
    ///
    /// # Safety
    ///
    /// Every address returned by `phys_to_virt` must be mapped, word
    /// aligned, and valid for volatile 32-bit access for the requested
    /// length. No other code may alias the OCRAM partition register or the
    /// TLB scratch buffer while this backend is in use.
    #[must_use]
    pub const unsafe fn new(phys_to_virt: PhysToVirt) -> Self {
        Self { phys_to_virt }
    }
}

impl MemorySpace for Mmio {
    fn read32(&self, vaddr: Vaddr) -> u32 {
        // SAFETY: `new` requires every handed-out address to be mapped.
        unsafe { core::ptr::read_volatile(vaddr.as_mut_ptr::<u32>().cast_const()) }
    }

    fn write32(&mut self, vaddr: Vaddr, value: u32) {
        // SAFETY: `new` requires every handed-out address to be mapped.
        unsafe { core::ptr::write_volatile(vaddr.as_mut_ptr::<u32>(), value) }
    }
}

impl Platform for Mmio {
    fn phys_to_virt(&self, paddr: Paddr, area: AreaType, len: u32) -> Option<Vaddr> {
        (self.phys_to_virt)(paddr, area, len)
    }
}
