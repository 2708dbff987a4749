// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Aperture and mapping-region descriptors.
//!
//! An [`Aperture`] is a physical window named by the platform (a peripheral
//! bus, the interrupt controller, DRAM). A [`MappingRegion`] is what the
//! mapping builder hands to the page-table writer: an aperture paired with
//! its virtual alias, granularity and attributes.

use crate::types::{Paddr, Vaddr};
use bitflags::bitflags;

/// A physical address window `[base, base + size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aperture {
    /// First byte of the window.
    pub base: Paddr,
    /// Length of the window in bytes.
    pub size: u32,
}

impl Aperture {
    /// Create a new aperture.
    #[inline]
    #[must_use]
    pub const fn new(base: Paddr, size: u32) -> Self {
        Self { base, size }
    }

    /// One past the last byte, widened so a window ending at 4 GiB does not wrap.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.base.as_u32() as u64 + self.size as u64
    }

    /// Check if `addr` lies inside this window.
    #[inline]
    #[must_use]
    pub const fn contains(&self, addr: Paddr) -> bool {
        let addr = addr.as_u32() as u64;
        addr >= self.base.as_u32() as u64 && addr < self.end()
    }

    /// Check if two windows share at least one byte.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        if self.size == 0 || other.size == 0 {
            return false;
        }
        (self.base.as_u32() as u64) < other.end() && (other.base.as_u32() as u64) < self.end()
    }
}

/// Memory-area class a region is mapped as.
///
/// The class selects the memory type written into the section entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AreaType {
    /// Secure device I/O - strongly ordered device memory.
    IoSec = 0,
    /// Secure coherent memory - normal cacheable memory, may hold code.
    TeeCoherent = 1,
}

impl AreaType {
    /// Returns true if the area is mapped as device memory.
    #[inline]
    #[must_use]
    pub const fn is_device(self) -> bool {
        matches!(self, Self::IoSec)
    }
}

bitflags! {
    /// Attribute flags carried by a mapping region.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MapAttr: u16 {
        /// Entry is a valid block/section mapping.
        const VALID_BLOCK = 1 << 0;
        /// Privileged read.
        const PR = 1 << 1;
        /// Privileged write.
        const PW = 1 << 2;
        /// Privileged execute.
        const PX = 1 << 3;
        /// Mapping is global (not tagged with an ASID).
        const GLOBAL = 1 << 4;
        /// Mapping targets the secure physical address space.
        const SECURE = 1 << 5;

        /// Privileged read-write.
        const PRW = Self::PR.bits() | Self::PW.bits();
        /// Attributes shared by every region the secure monitor maps.
        const SECURE_RW = Self::VALID_BLOCK.bits()
            | Self::PRW.bits()
            | Self::GLOBAL.bits()
            | Self::SECURE.bits();
    }
}

/// One region handed to the page-table writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingRegion {
    /// Physical base of the region.
    pub pa: Paddr,
    /// Virtual alias of `pa`.
    pub va: Vaddr,
    /// Granularity of each entry (one section).
    pub region_size: u32,
    /// Total span to map, in bytes.
    pub size: u32,
    /// Memory-area class.
    pub area: AreaType,
    /// Attribute flags.
    pub attrs: MapAttr,
}

impl MappingRegion {
    /// Number of `region_size` entries needed to cover `size`.
    ///
    /// Returns 0 for a zero granularity.
    #[inline]
    #[must_use]
    pub const fn entry_count(&self) -> u32 {
        if self.region_size == 0 {
            return 0;
        }
        self.size.div_ceil(self.region_size)
    }

    /// Physical window covered by the emitted entries.
    ///
    /// This rounds `size` up to whole entries, which is what actually
    /// becomes reachable through the translation table.
    #[inline]
    #[must_use]
    pub const fn physical_span(&self) -> Aperture {
        let covered = self.entry_count() as u64 * self.region_size as u64;
        let size = if covered > u32::MAX as u64 {
            u32::MAX
        } else {
            covered as u32
        };
        Aperture::new(self.pa, size)
    }

    /// Returns true if the region permits privileged execution.
    #[inline]
    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.attrs.contains(MapAttr::PX)
    }
}

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;
