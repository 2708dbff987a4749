// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the boot hook.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::dt::FakeTree;
use crate::platform::{LockModel, MemorySpace, MockPlatform};
use imx_ocram_abi::layout::MB;

const LPM: &str = "fsl,optee-lpm-sram";
const GPR11: Vaddr = Vaddr::new(0x3034_002C);

/// i.MX7 with identity aliases for peripherals and OCRAM, and RAM behind
/// the TLB buffer of `boundary`.
fn platform(boundary: u32) -> MockPlatform {
    MockPlatform::new()
        .with_window(Paddr::new(0x3000_0000), 0x0200_0000, Vaddr::new(0x3000_0000))
        .with_area_window(
            Paddr::new(0),
            16 * MB,
            Vaddr::new(0),
            AreaType::TeeCoherent,
        )
        .with_ram(Vaddr::new(boundary + 0x4000), TLB_BUFFER_SIZE)
        .with_register(GPR11, 0)
        .with_lock_model(
            GPR11,
            LockModel {
                protected: IMX7.gpr.protected_mask(),
                lock_shift: IMX7.gpr.lock_shift,
            },
        )
}

fn tree() -> FakeTree {
    FakeTree::new()
        .with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)))
        .with_property("overw_reg", &[0x0010_0000, 0x1000, 0])
        .with_property("overw_clock", &[1, 2, 3])
}

#[test]
fn defaults_before_first_run() {
    let hook = OcramBoot::new(IMX7);
    assert_eq!(hook.secure_boundary(), Paddr::new(0x0018_0000));
    assert_eq!(hook.tlb_phys_addr(), None);
    assert!(!hook.is_initialized());
    assert!(!hook.has_failed());
}

#[test]
fn first_run_partitions_and_maps() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0090_0000);
    let mut dt = tree();

    let outcome = hook.run(&mut p, Some(&mut dt), BootConfig::DEFAULT).unwrap();

    let BootOutcome::Initialized(summary) = outcome else {
        unreachable!("first run must initialize");
    };
    assert_eq!(summary.boundary, Paddr::new(0x0090_0000));
    assert_eq!(summary.tlb_phys, Paddr::new(0x0090_4000));
    assert_eq!(summary.tlb_virt, Vaddr::new(0x0090_4000));
    assert_eq!(summary.regions, 5);
    assert_eq!(summary.handoff.map(|r| r.applied), Some(2));

    assert_eq!(hook.secure_boundary(), Paddr::new(0x0090_0000));
    assert_eq!(hook.tlb_phys_addr(), Some(Paddr::new(0x0090_4000)));
    assert!(hook.is_initialized());

    let table = SectionTable::new(summary.tlb_virt);
    assert_eq!(table.entry(&p, 0x009), 0x0090_0000 | 0x1140E);
    assert_eq!(table.entry(&p, 0x310), 0x3100_0000 | 0x1140E);
    assert_eq!(table.entry(&p, 0x800), 0, "DRAM is never mapped");
    assert_eq!(dt.property("sram@900000", "reg"), Some(std::vec![0x0010_0000, 0x1000, 0]));
}

#[test]
fn second_run_touches_nothing() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0090_0000);
    let mut dt = tree();

    hook.run(&mut p, Some(&mut dt), BootConfig::DEFAULT).unwrap();
    let writes = p.writes().len();
    let ram_writes = p.ram_writes();

    let outcome = hook.run(&mut p, Some(&mut dt), BootConfig::DEFAULT).unwrap();

    assert_eq!(outcome, BootOutcome::AlreadyInitialized);
    assert_eq!(p.writes().len(), writes);
    assert_eq!(p.ram_writes(), ram_writes);
    assert_eq!(p.write_count(GPR11), 2, "configure once, lock once");
}

#[test]
fn fixed_config_ignores_the_tree() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0018_0000);

    let outcome = hook
        .run(&mut p, None::<&mut FakeTree>, BootConfig::FIXED)
        .unwrap();

    let BootOutcome::Initialized(summary) = outcome else {
        unreachable!("first run must initialize");
    };
    assert_eq!(summary.boundary, IMX7.default_boundary);
    assert_eq!(summary.tlb_phys, Paddr::new(0x0018_4000));
    assert_eq!(summary.handoff, None);
}

#[test]
fn handoff_can_be_disabled() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0090_0000);
    let mut dt = tree();
    let config = BootConfig {
        handoff: false,
        ..BootConfig::DEFAULT
    };

    let outcome = hook.run(&mut p, Some(&mut dt), config).unwrap();

    assert!(matches!(
        outcome,
        BootOutcome::Initialized(BootSummary { handoff: None, .. })
    ));
    assert_eq!(dt.property("sram@900000", "reg"), Some(std::vec![0x0090_0000, 0x1000]));
}

#[test]
fn handoff_failures_do_not_abort() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0090_0000);
    let mut dt = FakeTree::new().with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)));

    let outcome = hook.run(&mut p, Some(&mut dt), BootConfig::DEFAULT).unwrap();

    let BootOutcome::Initialized(summary) = outcome else {
        unreachable!("first run must initialize");
    };
    assert_eq!(summary.handoff.map(|r| r.failed), Some(2));
    assert_eq!(summary.regions, 5);
}

#[test]
fn missing_tree_aborts_before_any_write() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0018_0000);

    assert_eq!(
        hook.run(&mut p, None::<&mut FakeTree>, BootConfig::DEFAULT),
        Err(FatalError::NoDeviceTree)
    );
    assert!(p.writes().is_empty());
    assert_eq!(p.ram_writes(), 0);
    assert!(!hook.is_initialized());
    assert!(hook.has_failed());
}

#[test]
fn locked_register_aborts_before_mapping() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0090_0000);
    p.write32(GPR11, 0x003F_0001);
    let before = p.writes().len();

    assert_eq!(
        hook.run(&mut p, Some(&mut tree()), BootConfig::DEFAULT),
        Err(FatalError::AlreadyLocked { value: 0x003F_0001 })
    );
    assert_eq!(p.writes().len(), before);
    assert_eq!(p.ram_writes(), 0);
    assert_eq!(hook.tlb_phys_addr(), None);
}

#[test]
fn unmapped_tlb_buffer_is_fatal() {
    let hook = OcramBoot::new(IMX7);
    let mut p = MockPlatform::new()
        .with_window(Paddr::new(0x3000_0000), 0x0200_0000, Vaddr::new(0x3000_0000))
        .with_register(GPR11, 0);

    assert_eq!(
        hook.run(&mut p, None::<&mut FakeTree>, BootConfig::FIXED),
        Err(FatalError::Unmapped {
            paddr: Paddr::new(0x0018_4000),
            area: AreaType::TeeCoherent,
        })
    );
    assert_eq!(hook.tlb_phys_addr(), None);
}

#[test]
fn run_after_failed_mapping_keeps_failing() {
    let hook = OcramBoot::new(IMX7);
    // Only the GPR block has a secure I/O alias, so the first AIPS
    // aperture cannot be mapped.
    let mut p = MockPlatform::new()
        .with_window(Paddr::new(0x3034_0000), 0x1_0000, Vaddr::new(0x3034_0000))
        .with_area_window(
            Paddr::new(0),
            16 * MB,
            Vaddr::new(0),
            AreaType::TeeCoherent,
        )
        .with_ram(Vaddr::new(0x0018_4000), TLB_BUFFER_SIZE)
        .with_register(GPR11, 0);

    assert_eq!(
        hook.run(&mut p, None::<&mut FakeTree>, BootConfig::FIXED),
        Err(FatalError::Unmapped {
            paddr: Paddr::new(0x3000_0000),
            area: AreaType::IoSec,
        })
    );
    assert_eq!(p.write_count(GPR11), 2, "the split was already locked");
    assert_eq!(hook.tlb_phys_addr(), None);
    assert!(!hook.is_initialized());
    assert!(hook.has_failed());

    let writes = p.writes().len();
    let ram_writes = p.ram_writes();
    assert_eq!(
        hook.run(&mut p, None::<&mut FakeTree>, BootConfig::FIXED),
        Err(FatalError::SentinelRewrite)
    );
    assert_eq!(hook.tlb_phys_addr(), None);
    assert_eq!(p.writes().len(), writes);
    assert_eq!(p.ram_writes(), ram_writes);
}

#[test]
fn table_is_zeroed_before_mapping() {
    let hook = OcramBoot::new(IMX7);
    let mut p = platform(0x0018_0000);
    p.raw_memory_mut().fill(0xAA);

    hook.run(&mut p, None::<&mut FakeTree>, BootConfig::FIXED)
        .unwrap();

    let table = SectionTable::new(Vaddr::new(0x0018_4000));
    assert_eq!(table.entry(&p, 0x000), 0);
    assert_eq!(table.entry(&p, 0xFFF), 0);
    assert_eq!(table.entry(&p, 0x001), 0x0010_0000 | 0x1140E);
}

#[test]
#[should_panic(expected = "OCRAM initialization failed: no DTB found")]
fn init_ocram_aborts_on_fatal_error() {
    let mut p = platform(0x0018_0000);
    init_ocram::<_, FakeTree>(&mut p, None);
}
