// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! OCRAM partition register programming.
//!
//! The split is written in two steps: first the configured value without
//! lock bits, then the same value with lock bits. Latching the lock in the
//! first write could freeze whatever intermediate value the register held.
//! After locking, only the protected bits are compared.


use imx_ocram_abi::{AreaType, Paddr};

use crate::error::FatalError;
use crate::platform::Platform;
use crate::soc::GprLayout;

/// Program the secure boundary and lock it until reset.
///
/// Returns the value that was locked in, without lock bits.
///
/// # Errors
///
/// - [`FatalError::Unmapped`] if the register block has no secure I/O alias
/// - [`FatalError::AlreadyLocked`] if any lock bit was set before; nothing
///   is written in that case
/// - [`FatalError::LockMismatch`] if the protected bits do not read back as
///   written
pub fn configure_and_lock<P: Platform>(
    platform: &mut P,
    gpr: &GprLayout,
    boundary: Paddr,
) -> Result<u32, FatalError> {
    let Some(block) = platform.phys_to_virt(gpr.base, AreaType::IoSec, gpr.size) else {
        let err = FatalError::Unmapped {
            paddr: gpr.base,
            area: AreaType::IoSec,
        };
        log::error!("{err}");
        return Err(err);
    };
    let reg = block.add(gpr.offset);

    let current = platform.read32(reg);
    if gpr.is_locked(current) {
        let err = FatalError::AlreadyLocked { value: current };
        log::error!("{err}");
        return Err(err);
    }

    let value = gpr.configure(current, boundary);
    platform.write32(reg, value);
    platform.write32(reg, value | gpr.lock_bits());

    let mask = gpr.protected_mask();
    let locked = platform.read32(reg);
    if locked & mask != value & mask {
        let err = FatalError::LockMismatch {
            expected: value & mask,
            actual: locked & mask,
        };
        log::error!("{err}");
        return Err(err);
    }

    log::info!("OCRAM TZ split locked at {boundary} (GPR {value:#010x})");
    Ok(value)
}
