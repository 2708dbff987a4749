// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Flattened device tree reader.

use imx_ocram_abi::Paddr;

use super::{DeviceTree, DtNode};
use crate::error::FatalError;

/// A device tree blob parsed by the `fdt` crate.
pub struct FdtTree<'b> {
    fdt: fdt::Fdt<'b>,
}

impl<'b> FdtTree<'b> {
    /// Parse a blob held in memory.
    ///
    /// A blob that does not parse is treated like a missing one: the
    /// boundary lookup cannot proceed without it.
    pub fn new(blob: &'b [u8]) -> Result<Self, FatalError> {
        match fdt::Fdt::new(blob) {
            Ok(fdt) => Ok(Self { fdt }),
            Err(err) => {
                log::error!("invalid device tree blob: {err:?}");
                Err(FatalError::NoDeviceTree)
            }
        }
    }

    /// Parse the blob handed over by the previous boot stage.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a complete blob that stays valid and
    /// unmodified for the rest of the boot.
    pub unsafe fn from_ptr(ptr: *const u8) -> Result<FdtTree<'static>, FatalError> {
        if ptr.is_null() {
            return Err(FatalError::NoDeviceTree);
        }
        // SAFETY: forwarded from the caller.
        match unsafe { fdt::Fdt::from_ptr(ptr) } {
            Ok(fdt) => Ok(FdtTree { fdt }),
            Err(err) => {
                log::error!("invalid device tree blob: {err:?}");
                Err(FatalError::NoDeviceTree)
            }
        }
    }
}

impl DeviceTree for FdtTree<'_> {
    fn compatible_nodes<'a>(
        &'a self,
        compatible: &'a str,
    ) -> impl Iterator<Item = DtNode<'a>> + 'a {
        self.fdt
            .all_nodes()
            .filter(move |node| {
                node.compatible()
                    .is_some_and(|list| list.all().any(|entry| entry == compatible))
            })
            .map(|node| DtNode {
                name: node.name,
                reg_base: node
                    .reg()
                    .and_then(|mut regions| regions.next())
                    .and_then(|region| u32::try_from(region.starting_address as usize).ok())
                    .map(Paddr::new),
            })
    }
}
