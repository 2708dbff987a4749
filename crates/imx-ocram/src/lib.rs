// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # i.MX secure OCRAM
//!
//! Secure-world OCRAM partitioning for an i.MX7 TrustZone monitor.
//!
//! This crate runs once during platform bring-up. It:
//! - Finds the secure OCRAM boundary in the device tree
//! - Programs and locks the OCRAM secure/non-secure split
//! - Hands the moved secure-SRAM nodes over to the non-secure OS
//! - Builds the section table used while DRAM is in self-refresh
//!
//! Hardware access goes through [`platform::Platform`], so everything
//! except the volatile backend is host-testable.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod boot;
pub mod cell;
pub mod dt;
pub mod error;
pub mod handoff;
pub mod locator;
pub mod mapping;
pub mod partition;
pub mod pgtable;
pub mod platform;
pub mod soc;

pub use boot::{BootConfig, BootOutcome, OcramBoot, init_ocram, secure_boundary, tlb_phys_addr};
pub use error::{DescriptionError, FatalError};

/// Crate version.
pub const VERSION: &str = match option_env!("IMX_OCRAM_VERSION") {
    Some(v) => v,
    None => "unknown",
};
