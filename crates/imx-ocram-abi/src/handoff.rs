// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device-tree handoff requests.
//!
//! After the OCRAM split is locked, some nodes visible to the non-secure OS
//! still describe resources that now live inside the secure partition. Each
//! node carries a replacement property (`overw_reg`, `overw_clock`) with the
//! post-partition values; a handoff request copies it over the property the
//! OS actually reads.

/// One property rewrite applied to every node matching `compatible`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandoffRequest {
    /// Compatible string selecting the node(s) to rewrite.
    pub compatible: &'static str,
    /// Property holding the post-partition values.
    pub source: &'static str,
    /// Property overwritten with the contents of `source`.
    pub destination: &'static str,
    /// Number of 32-bit cells copied.
    pub cells: usize,
}

impl HandoffRequest {
    /// Create a new handoff request.
    #[must_use]
    pub const fn new(
        compatible: &'static str,
        source: &'static str,
        destination: &'static str,
        cells: usize,
    ) -> Self {
        Self {
            compatible,
            source,
            destination,
            cells,
        }
    }

    /// Number of bytes copied.
    #[inline]
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.cells * core::mem::size_of::<u32>()
    }
}
