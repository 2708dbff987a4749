// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Secure OCRAM boundary lookup.
//!
//! The boundary is the lowest base address among all nodes compatible with
//! one of the platform's secure-SRAM strings. Every such string must match
//! at least one node, and every matched node must carry a 4 KiB aligned
//! `reg`. Any deviation is fatal: a wrong boundary would hand secure memory
//! to the non-secure OS.

#[cfg(test)]
mod locator_test;

use imx_ocram_abi::Paddr;

use crate::dt::DeviceTree;
use crate::error::FatalError;
use crate::soc::PlatformDescriptor;

/// Boundary used when the device tree is not consulted at all.
#[inline]
#[must_use]
pub const fn fixed_boundary(desc: &PlatformDescriptor) -> Paddr {
    desc.default_boundary
}

/// Resolve the boundary from the device tree.
///
/// `tree` is `None` when device-tree support is enabled but the previous
/// boot stage handed over no blob. An empty secure-SRAM list yields the
/// platform default.
///
/// # Errors
///
/// Returns a [`FatalError`] if the blob is missing, a compatible string
/// matches no node, or a matched node has no usable or no aligned `reg`.
pub fn resolve_boundary<T: DeviceTree>(
    tree: Option<&T>,
    desc: &PlatformDescriptor,
) -> Result<Paddr, FatalError> {
    let Some(tree) = tree else {
        log::error!("no DTB found");
        return Err(FatalError::NoDeviceTree);
    };

    let mut lowest: Option<Paddr> = None;
    for &compatible in desc.secure_sram {
        let mut matched = false;
        for node in tree.compatible_nodes(compatible) {
            matched = true;
            let addr = checked_base(compatible, node.reg_base)?;
            log::debug!("{compatible} node {} at {addr}", node.name);
            if lowest.is_none_or(|low| addr < low) {
                lowest = Some(addr);
            }
        }
        if !matched {
            let err = FatalError::NodeNotFound { compatible };
            log::error!("{err}");
            return Err(err);
        }
    }

    let boundary = lowest.unwrap_or(desc.default_boundary);
    log::info!("secure OCRAM starts at {boundary}");
    Ok(boundary)
}

fn checked_base(compatible: &'static str, base: Option<Paddr>) -> Result<Paddr, FatalError> {
    let addr = match base {
        Some(addr) if !addr.is_null() => addr,
        _ => {
            let err = FatalError::MissingReg { compatible };
            log::error!("{err}");
            return Err(err);
        }
    };
    if !addr.is_page_aligned() {
        let err = FatalError::MisalignedBoundary { compatible, addr };
        log::error!("{err}");
        return Err(err);
    }
    Ok(addr)
}
