// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Secure monitor mappings for the low-power path.
//!
//! The TLB scratch buffer receives exactly these regions, in this order:
//!
//! 1. every platform aperture, as secure device memory without execute
//! 2. the OCRAM section holding the buffer itself, as executable coherent
//!    memory
//! 3. the interrupt controller, with the same attributes as (2)
//!
//! DRAM sits in self-refresh while these tables are live. Touching it
//! hangs the SoC, so a region reaching into DRAM is fatal.


use imx_ocram_abi::layout::SECTION_SIZE;
use imx_ocram_abi::{AreaType, MapAttr, MappingRegion, Paddr, Vaddr};

use crate::error::FatalError;
use crate::pgtable::SectionWriter;
use crate::platform::Platform;
use crate::soc::PlatformDescriptor;

/// Map every region into `writer`'s table.
///
/// `tlb_phys` is the physical address of the scratch buffer; the section
/// containing it is mapped. Returns the number of regions written.
///
/// # Errors
///
/// - [`FatalError::Unmapped`] if a region has no virtual alias
/// - [`FatalError::DramOverlap`] if a region reaches into DRAM
/// - any error of the section writer
pub fn build<P: Platform, W: SectionWriter>(
    platform: &mut P,
    desc: &PlatformDescriptor,
    tlb_phys: Paddr,
    writer: &mut W,
) -> Result<usize, FatalError> {
    let mut count = 0;

    for aperture in desc.apertures {
        let va = alias(platform, aperture.base, AreaType::IoSec, SECTION_SIZE)?;
        let region = MappingRegion {
            pa: aperture.base,
            va,
            region_size: SECTION_SIZE,
            size: aperture.size,
            area: AreaType::IoSec,
            attrs: MapAttr::SECURE_RW,
        };
        emit(platform, desc, writer, &region)?;
        count += 1;
    }

    let ocram = tlb_phys.section_base();
    let region = MappingRegion {
        pa: ocram,
        va: alias(platform, ocram, AreaType::TeeCoherent, SECTION_SIZE)?,
        region_size: SECTION_SIZE,
        size: SECTION_SIZE,
        area: AreaType::TeeCoherent,
        attrs: MapAttr::SECURE_RW | MapAttr::PX,
    };
    emit(platform, desc, writer, &region)?;
    count += 1;

    // The distributor is aliased as device I/O but mapped coherent.
    let region = MappingRegion {
        pa: desc.gic.base,
        va: alias(platform, desc.gic.base, AreaType::IoSec, desc.gic.size)?,
        region_size: SECTION_SIZE,
        size: SECTION_SIZE,
        area: AreaType::TeeCoherent,
        attrs: MapAttr::SECURE_RW | MapAttr::PX,
    };
    emit(platform, desc, writer, &region)?;
    count += 1;

    Ok(count)
}

fn alias<P: Platform>(
    platform: &P,
    paddr: Paddr,
    area: AreaType,
    len: u32,
) -> Result<Vaddr, FatalError> {
    platform.phys_to_virt(paddr, area, len).ok_or_else(|| {
        let err = FatalError::Unmapped { paddr, area };
        log::error!("{err}");
        err
    })
}

fn emit<P: Platform, W: SectionWriter>(
    platform: &mut P,
    desc: &PlatformDescriptor,
    writer: &mut W,
    region: &MappingRegion,
) -> Result<(), FatalError> {
    if region.physical_span().overlaps(&desc.dram) {
        let err = FatalError::DramOverlap { pa: region.pa };
        log::error!("{err}");
        return Err(err);
    }
    log::debug!(
        "map {} -> {} ({:#x} bytes, {:?}, {:?})",
        region.pa,
        region.va,
        region.size,
        region.area,
        region.attrs
    );
    writer.map_sections(platform, region)
}
