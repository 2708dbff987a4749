// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Address types.
//!
//! Newtypes prevent accidentally handing a virtual alias to code that
//! programs hardware with physical addresses, and vice versa.

mod addr;


pub use addr::{Paddr, Vaddr};
