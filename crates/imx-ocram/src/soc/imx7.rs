// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! i.MX7 Solo/Dual.

use imx_ocram_abi::layout::{KB, MB};
use imx_ocram_abi::{Aperture, HandoffRequest, Paddr};

use super::{GprLayout, PlatformDescriptor};

const AIPS1_BASE: Paddr = Paddr::new(0x3000_0000);
const AIPS2_BASE: Paddr = Paddr::new(0x3040_0000);
const AIPS3_BASE: Paddr = Paddr::new(0x3080_0000);
const AIPS_SIZE: u32 = 4 * MB;

const IOMUXC_GPR_BASE: Paddr = Paddr::new(0x3034_0000);
const IOMUXC_GPR_SIZE: u32 = 64 * KB;
const GPR_OCRAM: u32 = 11;

const TRUSTZONE_OCRAM_START: Paddr = Paddr::new(0x0018_0000);
const IRAM_TBL_OFFSET: u32 = 16 * KB;

const GIC_BASE: Paddr = Paddr::new(0x3100_0000);
const GIC_SIZE: u32 = 32 * KB;

const DRAM_BASE: Paddr = Paddr::new(0x8000_0000);
const DRAM_SIZE: u32 = 0x8000_0000;

const OPTEE_LPM_SRAM: &str = "fsl,optee-lpm-sram";

const APERTURES: [Aperture; 3] = [
    Aperture::new(AIPS1_BASE, AIPS_SIZE),
    Aperture::new(AIPS2_BASE, AIPS_SIZE),
    Aperture::new(AIPS3_BASE, AIPS_SIZE),
];

const HANDOFF: [HandoffRequest; 2] = [
    HandoffRequest::new(OPTEE_LPM_SRAM, "overw_reg", "reg", 3),
    HandoffRequest::new(OPTEE_LPM_SRAM, "overw_clock", "clocks", 3),
];

/// The i.MX7 platform.
pub const IMX7: PlatformDescriptor = PlatformDescriptor {
    name: "imx7",
    apertures: &APERTURES,
    default_boundary: TRUSTZONE_OCRAM_START,
    tlb_offset: IRAM_TBL_OFFSET,
    gic: Aperture::new(GIC_BASE, GIC_SIZE),
    dram: Aperture::new(DRAM_BASE, DRAM_SIZE),
    gpr: GprLayout {
        base: IOMUXC_GPR_BASE,
        size: IOMUXC_GPR_SIZE,
        offset: GPR_OCRAM * 4,
        addr_mask: 0x3E,
        addr_shift: 1,
        enable: 1 << 0,
        lock_shift: 16,
    },
    secure_sram: &[OPTEE_LPM_SRAM],
    handoff: &HANDOFF,
};
