// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware-description collaborators.
//!
//! This subsystem never parses or restructures a device tree itself. It
//! asks two narrow questions of a reader ("which nodes are compatible with
//! X, and where does their `reg` start?") and hands property rewrites to an
//! editor. The flattened-tree reader is backed by the `fdt` crate; the
//! editor lives with whoever owns the writable blob.

#[cfg(any(test, feature = "std"))]
mod fake;
#[cfg(feature = "fdt")]
mod flat;

#[cfg(any(test, feature = "std"))]
pub use fake::FakeTree;
#[cfg(feature = "fdt")]
pub use flat::FdtTree;

#[cfg(test)]
mod dt_test;

use imx_ocram_abi::{HandoffRequest, Paddr};

use crate::error::DescriptionError;

/// A node matched by compatible string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DtNode<'a> {
    /// Node name including unit address.
    pub name: &'a str,
    /// First address of the node's `reg` property, if it has one that fits
    /// in 32 bits.
    pub reg_base: Option<Paddr>,
}

/// Read-only view of the hardware description.
pub trait DeviceTree {
    /// Every node whose `compatible` list contains `compatible`, in tree
    /// order.
    fn compatible_nodes<'a>(&'a self, compatible: &'a str)
    -> impl Iterator<Item = DtNode<'a>> + 'a;
}

/// Property rewriting on the description handed to the non-secure OS.
pub trait DeviceTreeEditor {
    /// Copy `request.cells` cells of `request.source` over
    /// `request.destination` on every node matching `request.compatible`.
    ///
    /// Returns the number of nodes rewritten.
    fn overwrite(&mut self, request: &HandoffRequest) -> Result<usize, DescriptionError>;
}

/// A reader and an editor over the same description, used as one.
///
/// The flattened-tree reader cannot grow properties, so the blob owner
/// pairs it with its own editor.
pub struct Joined<R, E> {
    /// Answers compatible lookups.
    pub reader: R,
    /// Applies property rewrites.
    pub editor: E,
}

impl<R: DeviceTree, E> DeviceTree for Joined<R, E> {
    fn compatible_nodes<'a>(
        &'a self,
        compatible: &'a str,
    ) -> impl Iterator<Item = DtNode<'a>> + 'a {
        self.reader.compatible_nodes(compatible)
    }
}

impl<R, E: DeviceTreeEditor> DeviceTreeEditor for Joined<R, E> {
    fn overwrite(&mut self, request: &HandoffRequest) -> Result<usize, DescriptionError> {
        self.editor.overwrite(request)
    }
}
