// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared data types for i.MX secure OCRAM partitioning.
//!
//! This crate defines the vocabulary exchanged between the partitioning
//! code and its collaborators (page-table writer, device-tree editor):
//! - Physical and virtual address newtypes
//! - Aperture and mapping-region descriptors with their attribute flags
//! - Device-tree handoff requests
//! - Granularity constants (page, section, first-level table)
//!
//! # Design Principles
//!
//! - **No I/O**: Pure data types, 100% host-testable
//! - **32-bit only**: The short-descriptor MMU format addresses 4 GiB
//!
//! # Modules
//!
//! - [`types`]: `Paddr` and `Vaddr`
//! - [`region`]: `Aperture`, `MappingRegion`, `AreaType`, `MapAttr`
//! - [`handoff`]: `HandoffRequest`
//! - [`layout`]: Size and granularity constants

#![cfg_attr(not(test), no_std)]

pub mod handoff;
pub mod layout;
pub mod region;
pub mod types;

pub use handoff::HandoffRequest;
pub use region::{Aperture, AreaType, MapAttr, MappingRegion};
pub use types::{Paddr, Vaddr};
