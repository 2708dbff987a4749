// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! ARMv7 short-descriptor first-level section entries.
//!
//! ```text
//!  31        20 19 18 17 16 15 14  12 11 10 9  8   5 4  3 2 1 0
//! ┌────────────┬──┬──┬──┬──┬──┬──────┬─────┬─┬─────┬──┬─┬─┬───┐
//! │ PA[31:20]  │NS│0 │nG│S │A2│ TEX  │AP10 │ │ dom │XN│C│B│1 0│
//! └────────────┴──┴──┴──┴──┴──┴──────┴─────┴─┴─────┴──┴─┴─┴───┘
//! ```
//!
//! Domain is always 0. Device regions use `TEX=000 C=0 B=1` (shareable
//! device), coherent regions `TEX=001 C=1 B=1 S=1` (normal write-back
//! write-allocate, shareable).


use imx_ocram_abi::layout::{
    SECTION_ENTRY_SIZE, SECTION_SHIFT, SECTION_SIZE, SECTION_TABLE_ENTRIES,
};
use imx_ocram_abi::{MapAttr, MappingRegion, Vaddr};

use crate::error::FatalError;
use crate::platform::MemorySpace;

const SECTION: u32 = 0b10;
const BUFFERABLE: u32 = 1 << 2;
const CACHEABLE: u32 = 1 << 3;
const XN: u32 = 1 << 4;
const AP0: u32 = 1 << 10;
const TEX0: u32 = 1 << 12;
const AP2: u32 = 1 << 15;
const SHAREABLE: u32 = 1 << 16;
const NG: u32 = 1 << 17;
const NS: u32 = 1 << 19;

const SECTION_BASE_MASK: u32 = !(SECTION_SIZE - 1);

/// Inserts a region into a translation table.
pub trait SectionWriter {
    /// Write every section entry covering `region` through `mem`.
    ///
    /// # Errors
    ///
    /// Fails if the region uses another granularity than one section or
    /// does not fit the table.
    fn map_sections<M: MemorySpace>(
        &mut self,
        mem: &mut M,
        region: &MappingRegion,
    ) -> Result<(), FatalError>;
}

/// Attribute bits of a section entry for `region`, or 0 for a fault entry.
#[must_use]
pub fn section_bits(region: &MappingRegion) -> u32 {
    let attrs = region.attrs;
    if !attrs.contains(MapAttr::VALID_BLOCK) {
        return 0;
    }

    let mut bits = SECTION;
    if !attrs.contains(MapAttr::PX) {
        bits |= XN;
    }
    // AP[1:0] = 0b01 grants privileged access only; AP[2] makes it read-only.
    bits |= AP0;
    if !attrs.contains(MapAttr::PW) {
        bits |= AP2;
    }
    if !attrs.contains(MapAttr::GLOBAL) {
        bits |= NG;
    }
    if !attrs.contains(MapAttr::SECURE) {
        bits |= NS;
    }
    bits |= if region.area.is_device() {
        BUFFERABLE
    } else {
        TEX0 | CACHEABLE | BUFFERABLE | SHAREABLE
    };
    bits
}

/// A first-level table living in mapped memory at `base`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionTable {
    base: Vaddr,
}

impl SectionTable {
    /// Wrap the 16 KiB table at `base`.
    #[inline]
    #[must_use]
    pub const fn new(base: Vaddr) -> Self {
        Self { base }
    }

    /// Virtual address of the table.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> Vaddr {
        self.base
    }

    /// Read back one entry.
    #[must_use]
    pub fn entry<M: MemorySpace>(&self, mem: &M, index: u32) -> u32 {
        mem.read32(self.base.add(index * SECTION_ENTRY_SIZE))
    }
}

impl SectionWriter for SectionTable {
    fn map_sections<M: MemorySpace>(
        &mut self,
        mem: &mut M,
        region: &MappingRegion,
    ) -> Result<(), FatalError> {
        if region.region_size != SECTION_SIZE {
            let err = FatalError::BadGranularity {
                region_size: region.region_size,
            };
            log::error!("{err}");
            return Err(err);
        }

        let first = region.va.as_u32() >> SECTION_SHIFT;
        let count = region.entry_count();
        let fits = first
            .checked_add(count)
            .is_some_and(|end| end <= SECTION_TABLE_ENTRIES);
        let pa_fits = region
            .pa
            .as_u32()
            .checked_add(count.saturating_sub(1) * SECTION_SIZE)
            .is_some();
        if !fits || !pa_fits {
            let err = FatalError::TableOverflow { va: region.va };
            log::error!("{err}");
            return Err(err);
        }

        let bits = section_bits(region);
        let mut pa = region.pa.as_u32() & SECTION_BASE_MASK;
        for index in first..first + count {
            let entry = if bits == 0 { 0 } else { pa | bits };
            mem.write32(self.base.add(index * SECTION_ENTRY_SIZE), entry);
            pa = pa.wrapping_add(SECTION_SIZE);
        }
        Ok(())
    }
}
