// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Granularity and size constants.
//!
//! # Translation table geometry
//!
//! ```text
//! VA[31:20]  -> first-level index (4096 entries x 4 bytes = 16 KiB)
//! VA[19:0]   -> offset inside a 1 MiB section
//! ```
//!
//! The secure monitor only ever writes section entries, so one complete
//! first-level table fits the 16 KiB TLB scratch buffer exactly.

/// One megabyte in bytes.
pub const MB: u32 = 1024 * 1024;

/// One kilobyte in bytes.
pub const KB: u32 = 1024;

/// Standard page size (4 KB). OCRAM partition granularity.
pub const PAGE_SIZE: u32 = 4 * KB;

/// Page size shift (log2 of `PAGE_SIZE`).
pub const PAGE_SHIFT: u32 = 12;

/// Section size (1 MB), the granularity of every mapping we emit.
pub const SECTION_SIZE: u32 = MB;

/// Section size shift (log2 of `SECTION_SIZE`).
pub const SECTION_SHIFT: u32 = 20;

/// Size of one first-level descriptor in bytes.
pub const SECTION_ENTRY_SIZE: u32 = 4;

/// Number of first-level entries covering the 32-bit address space.
pub const SECTION_TABLE_ENTRIES: u32 = 1 << (32 - SECTION_SHIFT);

/// Size of the TLB scratch buffer (16 KB).
pub const TLB_BUFFER_SIZE: u32 = 16 * KB;

const _: () = {
    assert!(PAGE_SIZE == 1 << PAGE_SHIFT);
    assert!(SECTION_SIZE == 1 << SECTION_SHIFT);
    assert!(SECTION_TABLE_ENTRIES * SECTION_ENTRY_SIZE == TLB_BUFFER_SIZE);
};
