// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock platform implementation for testing.
//!
//! `MockPlatform` stands in for the SoC: a set of 32-bit registers with an
//! optional lock-bit model, a heap-backed RAM window for the TLB scratch
//! buffer, and a table of physical-to-virtual windows. Every register write
//! is logged so tests can count hardware side effects.

use imx_ocram_abi::{AreaType, Paddr, Vaddr};

use crate::platform::traits::{MemorySpace, Platform};

use std::{boxed::Box, collections::BTreeMap, vec, vec::Vec};

/// Lock-bit behaviour of a register.
///
/// Bit `n + lock_shift` freezes protected bit `n`. Lock bits themselves are
/// sticky: once set, only a reset clears them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockModel {
    /// Bits that can be frozen.
    pub protected: u32,
    /// Distance between a protected bit and its lock bit.
    pub lock_shift: u32,
}

impl LockModel {
    fn apply(self, old: u32, new: u32) -> u32 {
        let lock_bits = self.protected << self.lock_shift;
        let frozen = (old & lock_bits) >> self.lock_shift;
        let merged = (new & !frozen) | (old & frozen);
        merged | (old & lock_bits)
    }
}

#[derive(Clone, Copy, Debug)]
struct MockRegister {
    value: u32,
    lock: Option<LockModel>,
    stuck_mask: u32,
    stuck_value: u32,
}

#[derive(Clone, Copy, Debug)]
struct Window {
    pa: Paddr,
    size: u32,
    va: Vaddr,
    area: Option<AreaType>,
}

/// A recording stand-in for the SoC.
pub struct MockPlatform {
    registers: BTreeMap<u32, MockRegister>,
    writes: Vec<(Vaddr, u32)>,
    ram: Box<[u8]>,
    ram_base: Vaddr,
    ram_writes: usize,
    windows: Vec<Window>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatform {
    /// Create a mock with no registers, no RAM and no mappings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registers: BTreeMap::new(),
            writes: Vec::new(),
            ram: Vec::new().into_boxed_slice(),
            ram_base: Vaddr::new(0),
            ram_writes: 0,
            windows: Vec::new(),
        }
    }

    /// Back `[base, base + size)` with zero-initialised RAM.
    ///
    /// Writes inside this window are memory writes, not register writes.
    #[must_use]
    pub fn with_ram(mut self, base: Vaddr, size: u32) -> Self {
        self.ram = vec![0u8; size as usize].into_boxed_slice();
        self.ram_base = base;
        self
    }

    /// Alias `[pa, pa + size)` at `va` for any memory-area class.
    #[must_use]
    pub fn with_window(mut self, pa: Paddr, size: u32, va: Vaddr) -> Self {
        self.windows.push(Window {
            pa,
            size,
            va,
            area: None,
        });
        self
    }

    /// Alias `[pa, pa + size)` at `va`, but only when mapped as `area`.
    #[must_use]
    pub fn with_area_window(mut self, pa: Paddr, size: u32, va: Vaddr, area: AreaType) -> Self {
        self.windows.push(Window {
            pa,
            size,
            va,
            area: Some(area),
        });
        self
    }

    /// Define a register with its reset value.
    #[must_use]
    pub fn with_register(mut self, va: Vaddr, value: u32) -> Self {
        self.registers.insert(
            va.as_u32(),
            MockRegister {
                value,
                lock: None,
                stuck_mask: 0,
                stuck_value: 0,
            },
        );
        self
    }

    /// Give an existing register lock-bit semantics.
    #[must_use]
    pub fn with_lock_model(mut self, va: Vaddr, lock: LockModel) -> Self {
        self.register_mut(va).lock = Some(lock);
        self
    }

    /// Force `mask` bits of a register to always read as `value`.
    ///
    /// Models a faulty or externally held register.
    #[must_use]
    pub fn with_stuck_bits(mut self, va: Vaddr, mask: u32, value: u32) -> Self {
        let reg = self.register_mut(va);
        reg.stuck_mask = mask;
        reg.stuck_value = value & mask;
        self
    }

    /// Current value of a register without logging a read.
    #[must_use]
    pub fn register(&self, va: Vaddr) -> u32 {
        self.registers.get(&va.as_u32()).map_or(0, |reg| reg.value)
    }

    /// All register writes, in order.
    #[must_use]
    pub fn writes(&self) -> &[(Vaddr, u32)] {
        &self.writes
    }

    /// Number of writes made to one register.
    #[must_use]
    pub fn write_count(&self, va: Vaddr) -> usize {
        self.writes.iter().filter(|(addr, _)| *addr == va).count()
    }

    /// Number of word writes that landed in RAM.
    #[must_use]
    pub const fn ram_writes(&self) -> usize {
        self.ram_writes
    }

    /// Get raw access to the backing RAM (for debugging/testing).
    #[must_use]
    pub fn raw_memory(&self) -> &[u8] {
        &self.ram
    }

    /// Get mutable raw access to the backing RAM (for debugging/testing).
    #[must_use]
    pub fn raw_memory_mut(&mut self) -> &mut [u8] {
        &mut self.ram
    }

    #[expect(
        clippy::panic,
        reason = "test mock panics intentionally on undefined register"
    )]
    fn register_mut(&mut self, va: Vaddr) -> &mut MockRegister {
        self.registers
            .get_mut(&va.as_u32())
            .unwrap_or_else(|| panic!("register {va} is not defined"))
    }

    /// Offset into RAM for a word access, if the word lies inside it.
    fn ram_offset(&self, vaddr: Vaddr) -> Option<usize> {
        let offset = vaddr.as_u32().checked_sub(self.ram_base.as_u32())? as usize;
        offset
            .checked_add(4)
            .is_some_and(|end| end <= self.ram.len())
            .then_some(offset)
    }
}

impl MemorySpace for MockPlatform {
    #[expect(
        clippy::panic,
        reason = "test mock panics intentionally on undefined register"
    )]
    fn read32(&self, vaddr: Vaddr) -> u32 {
        if let Some(offset) = self.ram_offset(vaddr) {
            let mut word = [0u8; 4];
            word.copy_from_slice(&self.ram[offset..offset + 4]);
            return u32::from_le_bytes(word);
        }
        match self.registers.get(&vaddr.as_u32()) {
            Some(reg) => reg.value,
            None => panic!("read of undefined register {vaddr}"),
        }
    }

    fn write32(&mut self, vaddr: Vaddr, value: u32) {
        if let Some(offset) = self.ram_offset(vaddr) {
            self.ram[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            self.ram_writes += 1;
            return;
        }

        self.writes.push((vaddr, value));
        let reg = self
            .registers
            .entry(vaddr.as_u32())
            .or_insert(MockRegister {
                value: 0,
                lock: None,
                stuck_mask: 0,
                stuck_value: 0,
            });
        let mut next = match reg.lock {
            Some(lock) => lock.apply(reg.value, value),
            None => value,
        };
        next = (next & !reg.stuck_mask) | reg.stuck_value;
        reg.value = next;
    }
}

impl Platform for MockPlatform {
    fn phys_to_virt(&self, paddr: Paddr, area: AreaType, len: u32) -> Option<Vaddr> {
        let start = u64::from(paddr.as_u32());
        let end = start + u64::from(len);
        self.windows
            .iter()
            .filter(|w| w.area.is_none_or(|a| a == area))
            .find(|w| {
                let w_start = u64::from(w.pa.as_u32());
                start >= w_start && end <= w_start + u64::from(w.size)
            })
            .map(|w| w.va.add(paddr.offset_from(w.pa)))
    }
}
