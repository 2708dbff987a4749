// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! In-memory device tree for testing.
//!
//! Nodes are a flat list; properties are stored as big-endian byte strings
//! exactly as they would appear in a blob.

use imx_ocram_abi::{HandoffRequest, Paddr};

use super::{DeviceTree, DeviceTreeEditor, DtNode};
use crate::error::DescriptionError;

use std::{collections::BTreeMap, string::String, vec::Vec};

struct FakeNode {
    name: String,
    compatible: &'static str,
    props: BTreeMap<&'static str, Vec<u8>>,
}

/// A device tree that can be read and rewritten in tests.
#[derive(Default)]
pub struct FakeTree {
    nodes: Vec<FakeNode>,
}

fn to_bytes(cells: &[u32]) -> Vec<u8> {
    cells.iter().flat_map(|cell| cell.to_be_bytes()).collect()
}

impl FakeTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. `reg` is `(address, size)` with one cell each.
    #[must_use]
    pub fn with_node(mut self, name: &str, compatible: &'static str, reg: Option<(u32, u32)>) -> Self {
        let mut props = BTreeMap::new();
        if let Some((addr, size)) = reg {
            props.insert("reg", to_bytes(&[addr, size]));
        }
        self.nodes.push(FakeNode {
            name: String::from(name),
            compatible,
            props,
        });
        self
    }

    /// Set a property on the most recently added node.
    #[must_use]
    #[expect(
        clippy::panic,
        reason = "test fake panics intentionally when misused"
    )]
    pub fn with_property(mut self, prop: &'static str, cells: &[u32]) -> Self {
        let Some(node) = self.nodes.last_mut() else {
            panic!("with_property called before with_node");
        };
        node.props.insert(prop, to_bytes(cells));
        self
    }

    /// Read a property back as cells.
    #[must_use]
    pub fn property(&self, node: &str, prop: &str) -> Option<Vec<u32>> {
        let bytes = self
            .nodes
            .iter()
            .find(|n| n.name == node)?
            .props
            .get(prop)?;
        Some(
            bytes
                .chunks_exact(4)
                .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }
}

impl DeviceTree for FakeTree {
    fn compatible_nodes<'a>(
        &'a self,
        compatible: &'a str,
    ) -> impl Iterator<Item = DtNode<'a>> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.compatible == compatible)
            .map(|node| DtNode {
                name: &node.name,
                reg_base: node
                    .props
                    .get("reg")
                    .and_then(|reg| reg.get(..4))
                    .map(|c| Paddr::new(u32::from_be_bytes([c[0], c[1], c[2], c[3]]))),
            })
    }
}

impl DeviceTreeEditor for FakeTree {
    fn overwrite(&mut self, request: &HandoffRequest) -> Result<usize, DescriptionError> {
        let needed = request.byte_len();
        let mut rewritten = 0;
        for node in self
            .nodes
            .iter_mut()
            .filter(|node| node.compatible == request.compatible)
        {
            let source = node
                .props
                .get(request.source)
                .ok_or(DescriptionError::PropertyNotFound)?;
            let Some(value) = source.get(..needed) else {
                return Err(DescriptionError::PropertyTooShort {
                    available: source.len(),
                });
            };
            let value = value.to_vec();
            node.props.insert(request.destination, value);
            rewritten += 1;
        }
        if rewritten == 0 {
            return Err(DescriptionError::NodeNotFound);
        }
        Ok(rewritten)
    }
}
