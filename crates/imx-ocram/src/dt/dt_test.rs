// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the in-memory tree and the reader/editor pairing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::vec::Vec;

const LPM: &str = "fsl,optee-lpm-sram";
const REG: HandoffRequest = HandoffRequest::new(LPM, "overw_reg", "reg", 3);

#[test]
fn fake_reports_first_reg_cell() {
    let tree = FakeTree::new()
        .with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)))
        .with_node("uart@30860000", "fsl,imx7d-uart", Some((0x3086_0000, 0x1_0000)));

    let nodes: Vec<_> = tree.compatible_nodes(LPM).collect();
    assert_eq!(
        nodes,
        [DtNode {
            name: "sram@900000",
            reg_base: Some(Paddr::new(0x0090_0000)),
        }]
    );
}

#[test]
fn overwrite_copies_exactly_the_requested_cells() {
    let mut tree = FakeTree::new()
        .with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)))
        .with_property("overw_reg", &[0x0010_0000, 0x1000, 7, 8]);

    assert_eq!(tree.overwrite(&REG), Ok(1));
    assert_eq!(
        tree.property("sram@900000", "reg"),
        Some(std::vec![0x0010_0000, 0x1000, 7])
    );
}

#[test]
fn overwrite_can_create_the_destination() {
    let mut tree = FakeTree::new()
        .with_node("sram", LPM, None)
        .with_property("overw_reg", &[1, 2, 3]);

    assert_eq!(tree.overwrite(&REG), Ok(1));
    assert_eq!(tree.property("sram", "reg"), Some(std::vec![1, 2, 3]));
}

#[test]
fn overwrite_errors() {
    let mut empty = FakeTree::new();
    assert_eq!(empty.overwrite(&REG), Err(DescriptionError::NodeNotFound));

    let mut no_source = FakeTree::new().with_node("sram", LPM, None);
    assert_eq!(
        no_source.overwrite(&REG),
        Err(DescriptionError::PropertyNotFound)
    );

    let mut short = FakeTree::new()
        .with_node("sram", LPM, None)
        .with_property("overw_reg", &[1, 2]);
    assert_eq!(
        short.overwrite(&REG),
        Err(DescriptionError::PropertyTooShort { available: 8 })
    );
}

#[test]
fn joined_reads_from_reader_and_writes_to_editor() {
    let reader = FakeTree::new().with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)));
    let editor = FakeTree::new()
        .with_node("sram@900000", LPM, Some((0x0090_0000, 0x1000)))
        .with_property("overw_reg", &[0x0010_0000, 0x1000, 0]);
    let mut joined = Joined { reader, editor };

    assert_eq!(joined.compatible_nodes(LPM).count(), 1);
    assert_eq!(joined.overwrite(&REG), Ok(1));
    assert_eq!(
        joined.editor.property("sram@900000", "reg"),
        Some(std::vec![0x0010_0000, 0x1000, 0])
    );
    assert_eq!(
        joined.reader.property("sram@900000", "reg"),
        Some(std::vec![0x0090_0000, 0x1000])
    );
}

#[test]
#[should_panic(expected = "with_property called before with_node")]
fn property_without_node_panics() {
    let _ = FakeTree::new().with_property("reg", &[0]);
}
