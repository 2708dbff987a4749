// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction for OCRAM partitioning.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Locator / Configurator / Mapping Builder          │
//! └─────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │            `MemorySpace` + `Platform`                    │
//! └─────────────────────────────────────────────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌─────────────────────┐      ┌─────────────────────────────┐
//! │   `MockPlatform`    │      │          `Mmio`             │
//! │   (for testing)     │      │   (volatile, on the SoC)    │
//! └─────────────────────┘      └─────────────────────────────┘
//! ```


// Mock requires alloc, only available with std or test
#[cfg(any(test, feature = "std"))]
mod mock;
#[cfg(feature = "mmio")]
mod mmio;
mod traits;

#[cfg(any(test, feature = "std"))]
pub use mock::{LockModel, MockPlatform};
#[cfg(feature = "mmio")]
pub use mmio::{Mmio, PhysToVirt};
pub use traits::{MemorySpace, Platform};
