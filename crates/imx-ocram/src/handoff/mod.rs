// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device-tree handoff to the non-secure OS.
//!
//! Rewrites are metadata only. A failed rewrite leaves the OS with its
//! original view of the node, which is wrong but not a security problem,
//! so failures are logged and counted instead of aborting boot.


use imx_ocram_abi::HandoffRequest;

use crate::dt::DeviceTreeEditor;

/// Outcome of a handoff pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandoffReport {
    /// Requests that rewrote at least one node.
    pub applied: usize,
    /// Requests the editor rejected.
    pub failed: usize,
    /// Nodes rewritten across all requests.
    pub nodes: usize,
}

impl HandoffReport {
    /// Returns true if every request was applied.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Apply `requests` in order, never stopping early.
pub fn apply<E: DeviceTreeEditor>(editor: &mut E, requests: &[HandoffRequest]) -> HandoffReport {
    let mut report = HandoffReport::default();
    for request in requests {
        match editor.overwrite(request) {
            Ok(nodes) => {
                log::debug!(
                    "{}: {} -> {} on {nodes} node(s)",
                    request.compatible,
                    request.source,
                    request.destination
                );
                report.applied += 1;
                report.nodes += nodes;
            }
            Err(err) => {
                log::warn!(
                    "{}: cannot overwrite {} with {}: {err}",
                    request.compatible,
                    request.destination,
                    request.source
                );
                report.failed += 1;
            }
        }
    }
    report
}
