// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Error categories.
//!
//! Two severities exist and they never mix:
//!
//! - [`FatalError`]: the secure/non-secure split cannot be trusted. The
//!   registered initializer turns every one of these into a boot abort.
//!   Nothing in this crate retries or downgrades them.
//! - [`DescriptionError`]: the device-tree editor could not apply a
//!   best-effort handoff rewrite. Logged and counted, never fatal.

use core::fmt;

use imx_ocram_abi::{AreaType, Paddr, Vaddr};

/// Security-inconsistency detected while partitioning OCRAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// Device-tree support is enabled but no blob was handed over.
    NoDeviceTree,
    /// No node matches an expected secure-SRAM compatible string.
    NodeNotFound {
        /// Compatible string that matched nothing.
        compatible: &'static str,
    },
    /// A matching node has no usable `reg` base address.
    MissingReg {
        /// Compatible string of the offending node.
        compatible: &'static str,
    },
    /// A secure-SRAM node is not 4 KiB aligned.
    MisalignedBoundary {
        /// Compatible string of the offending node.
        compatible: &'static str,
        /// Address found in the node.
        addr: Paddr,
    },
    /// The partition register was already locked before we touched it.
    AlreadyLocked {
        /// Register value read before any write.
        value: u32,
    },
    /// The protected bits did not read back as written after locking.
    LockMismatch {
        /// Protected bits we wrote.
        expected: u32,
        /// Protected bits the hardware reports.
        actual: u32,
    },
    /// The address-mapping collaborator has no alias for a physical range.
    Unmapped {
        /// Physical address that could not be aliased.
        paddr: Paddr,
        /// Memory-area class requested.
        area: AreaType,
    },
    /// A region would make DRAM reachable through the secure tables.
    DramOverlap {
        /// Physical base of the offending region.
        pa: Paddr,
    },
    /// A region does not fit the first-level translation table.
    TableOverflow {
        /// Virtual base of the offending region.
        va: Vaddr,
    },
    /// A region uses a granularity other than one section.
    BadGranularity {
        /// Granularity requested.
        region_size: u32,
    },
    /// A boot sentinel was written a second time.
    SentinelRewrite,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NoDeviceTree => write!(f, "no DTB found"),
            Self::NodeNotFound { compatible } => {
                write!(f, "cannot find {compatible} node in the device tree")
            }
            Self::MissingReg { compatible } => {
                write!(f, "cannot get reg property of {compatible}")
            }
            Self::MisalignedBoundary { compatible, addr } => {
                write!(f, "{compatible} address {addr} is not 4 KiB aligned")
            }
            Self::AlreadyLocked { value } => write!(
                f,
                "GPR registers for OCRAM TZ configuration locked ({value:#010x})"
            ),
            Self::LockMismatch { expected, actual } => write!(
                f,
                "OCRAM TZ configuration lock mismatch: wrote {expected:#010x}, read {actual:#010x}"
            ),
            Self::Unmapped { paddr, area } => {
                write!(f, "no {area:?} mapping for physical address {paddr}")
            }
            Self::DramOverlap { pa } => {
                write!(f, "region at {pa} overlaps DRAM in self-refresh")
            }
            Self::TableOverflow { va } => {
                write!(f, "region at {va} overflows the translation table")
            }
            Self::BadGranularity { region_size } => {
                write!(f, "unsupported mapping granularity {region_size:#x}")
            }
            Self::SentinelRewrite => write!(f, "boot sentinel written twice"),
        }
    }
}

/// Failure reported by the device-tree editor during handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionError {
    /// No node matches the request's compatible string.
    NodeNotFound,
    /// The source property is absent.
    PropertyNotFound,
    /// The source property holds fewer cells than requested.
    PropertyTooShort {
        /// Bytes actually present.
        available: usize,
    },
}

impl fmt::Display for DescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NodeNotFound => write!(f, "node not found"),
            Self::PropertyNotFound => write!(f, "property not found"),
            Self::PropertyTooShort { available } => {
                write!(f, "property too short ({available} bytes)")
            }
        }
    }
}
