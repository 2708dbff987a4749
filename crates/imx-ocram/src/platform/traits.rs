// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction traits.

use imx_ocram_abi::{AreaType, Paddr, Vaddr};

/// 32-bit access to mapped memory and registers.
///
/// Partitioning code reads and writes through this trait without knowing
/// whether it talks to the SoC or to a recording mock.
pub trait MemorySpace {
    /// Read a 32-bit word at a virtual address.
    fn read32(&self, vaddr: Vaddr) -> u32;

    /// Write a 32-bit word at a virtual address.
    fn write32(&mut self, vaddr: Vaddr, value: u32);

    /// Zero `len` bytes starting at `vaddr`, one word at a time.
    ///
    /// `len` is rounded down to whole words.
    fn zero(&mut self, vaddr: Vaddr, len: u32) {
        let mut offset = 0;
        while offset + 4 <= len {
            self.write32(vaddr.add(offset), 0);
            offset += 4;
        }
    }
}

/// Platform services consumed during OCRAM partitioning.
///
/// Besides raw memory access, the only thing this subsystem asks of the
/// surrounding monitor is a virtual alias for a physical range.
pub trait Platform: MemorySpace {
    /// Return a usable virtual address for `[paddr, paddr + len)` mapped as
    /// `area`, or `None` if the range is not mapped in that class.
    fn phys_to_virt(&self, paddr: Paddr, area: AreaType, len: u32) -> Option<Vaddr>;
}
