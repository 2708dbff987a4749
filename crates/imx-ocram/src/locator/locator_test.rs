// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the boundary lookup.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::dt::FakeTree;
use crate::soc::IMX7;
use proptest::prelude::*;

const LPM: &str = "fsl,optee-lpm-sram";
const DDR: &str = "fsl,imx7-ddr-sram";

fn with_sram(list: &'static [&'static str]) -> PlatformDescriptor {
    PlatformDescriptor {
        secure_sram: list,
        ..IMX7
    }
}

#[test]
fn lowest_match_wins() {
    let tree = FakeTree::new()
        .with_node("sram@910000", LPM, Some((0x0091_0000, 0x1000)))
        .with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)));

    assert_eq!(
        resolve_boundary(Some(&tree), &IMX7),
        Ok(Paddr::new(0x0090_0000))
    );
}

#[test]
fn lowest_across_compatible_strings() {
    let tree = FakeTree::new()
        .with_node("sram@910000", LPM, Some((0x0091_0000, 0x1000)))
        .with_node("ddr-sram@908000", DDR, Some((0x0090_8000, 0x1000)));

    assert_eq!(
        resolve_boundary(Some(&tree), &with_sram(&[LPM, DDR])),
        Ok(Paddr::new(0x0090_8000))
    );
}

#[test]
fn misaligned_node_is_fatal() {
    let tree = FakeTree::new().with_node("sram@1001", LPM, Some((0x1001, 0x1000)));

    assert_eq!(
        resolve_boundary(Some(&tree), &IMX7),
        Err(FatalError::MisalignedBoundary {
            compatible: LPM,
            addr: Paddr::new(0x1001),
        })
    );
}

#[test]
fn misaligned_node_is_fatal_even_above_an_aligned_one() {
    let tree = FakeTree::new()
        .with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)))
        .with_node("sram@910800", LPM, Some((0x0091_0800, 0x1000)));

    assert!(matches!(
        resolve_boundary(Some(&tree), &IMX7),
        Err(FatalError::MisalignedBoundary { .. })
    ));
}

#[test]
fn missing_node_is_fatal() {
    let tree = FakeTree::new().with_node("sram@900000", DDR, Some((0x0090_0000, 0x1000)));

    assert_eq!(
        resolve_boundary(Some(&tree), &IMX7),
        Err(FatalError::NodeNotFound { compatible: LPM })
    );
}

#[test]
fn second_string_without_node_is_fatal() {
    let tree = FakeTree::new().with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)));

    assert_eq!(
        resolve_boundary(Some(&tree), &with_sram(&[LPM, DDR])),
        Err(FatalError::NodeNotFound { compatible: DDR })
    );
}

#[test]
fn missing_or_zero_reg_is_fatal() {
    let no_reg = FakeTree::new().with_node("sram", LPM, None);
    let zero_reg = FakeTree::new().with_node("sram@0", LPM, Some((0, 0x1000)));

    for tree in [no_reg, zero_reg] {
        assert_eq!(
            resolve_boundary(Some(&tree), &IMX7),
            Err(FatalError::MissingReg { compatible: LPM })
        );
    }
}

#[test]
fn missing_blob_is_fatal() {
    assert_eq!(
        resolve_boundary::<FakeTree>(None, &IMX7),
        Err(FatalError::NoDeviceTree)
    );
}

#[test]
fn empty_list_returns_default() {
    let tree = FakeTree::new().with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)));

    assert_eq!(
        resolve_boundary(Some(&tree), &with_sram(&[])),
        Ok(IMX7.default_boundary)
    );
}

#[test]
fn fixed_boundary_is_the_default() {
    assert_eq!(fixed_boundary(&IMX7), Paddr::new(0x0018_0000));
}

proptest! {
    #[test]
    fn resolved_boundary_is_page_aligned(addrs in prop::collection::vec(1u32..0x0010_0000, 1..6)) {
        let mut tree = FakeTree::new();
        for (i, addr) in addrs.iter().enumerate() {
            tree = tree.with_node(&std::format!("sram{i}"), LPM, Some((*addr, 0x1000)));
        }

        match resolve_boundary(Some(&tree), &IMX7) {
            Ok(boundary) => {
                prop_assert_eq!(boundary.as_u32() % 4096, 0);
                prop_assert_eq!(boundary.as_u32(), *addrs.iter().min().unwrap());
            }
            Err(FatalError::MisalignedBoundary { addr, .. }) => {
                prop_assert_ne!(addr.as_u32() % 4096, 0);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }
}
