// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! One-shot OCRAM initialization.
//!
//! ```text
//!  UNINITIALIZED ──run()──▶ INITIALIZED ──run()──▶ INITIALIZED (no-op)
//!        │
//!        └──run() fails──▶ FAILED ──run()──▶ FAILED (SentinelRewrite)
//! ```
//!
//! The first successful run resolves and locks the boundary, hands the
//! updated nodes to the non-secure OS, and fills the TLB scratch buffer.
//! The TLB address is published only after the table is complete; once it
//! is set, later runs return without touching hardware. A run that fails
//! partway leaves the hook FAILED: OCRAM may already be locked, so a retry
//! cannot be trusted.
//!
//! The firmware registers [`init_ocram`], which drives the global
//! [`OcramBoot`] for [`IMX7`] and aborts on any [`FatalError`].

#[cfg(test)]
mod boot_test;

use imx_ocram_abi::layout::TLB_BUFFER_SIZE;
use imx_ocram_abi::{AreaType, Paddr, Vaddr};

use crate::cell::WriteOnce;
use crate::dt::{DeviceTree, DeviceTreeEditor};
use crate::error::FatalError;
use crate::handoff::{self, HandoffReport};
use crate::locator;
use crate::mapping;
use crate::partition;
use crate::pgtable::SectionTable;
use crate::platform::Platform;
use crate::soc::{IMX7, PlatformDescriptor};

/// Runtime switches of the boot hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootConfig {
    /// Resolve the boundary from the device tree instead of the default.
    pub device_tree: bool,
    /// Rewrite secure-SRAM nodes for the non-secure OS.
    pub handoff: bool,
}

impl BootConfig {
    /// Device tree consulted, handoff applied.
    pub const DEFAULT: Self = Self {
        device_tree: true,
        handoff: true,
    };

    /// Fixed boundary, no handoff.
    pub const FIXED: Self = Self {
        device_tree: false,
        handoff: false,
    };
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What the first run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootSummary {
    /// Start of secure OCRAM.
    pub boundary: Paddr,
    /// Partition register value locked in, without lock bits.
    pub gpr_value: u32,
    /// Physical address of the TLB scratch buffer.
    pub tlb_phys: Paddr,
    /// Virtual address of the TLB scratch buffer.
    pub tlb_virt: Vaddr,
    /// Regions written into the buffer.
    pub regions: usize,
    /// Handoff result, if handoff ran.
    pub handoff: Option<HandoffReport>,
}

/// Result of [`OcramBoot::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootOutcome {
    /// This call initialized OCRAM.
    Initialized(BootSummary),
    /// An earlier call already did; nothing was touched.
    AlreadyInitialized,
}

/// Boot state for one platform.
pub struct OcramBoot {
    desc: PlatformDescriptor,
    started: WriteOnce<()>,
    boundary: WriteOnce<Paddr>,
    tlb_phys: WriteOnce<Paddr>,
}

impl OcramBoot {
    /// Create an uninitialized hook for `desc`.
    #[must_use]
    pub const fn new(desc: PlatformDescriptor) -> Self {
        Self {
            desc,
            started: WriteOnce::new(),
            boundary: WriteOnce::new(),
            tlb_phys: WriteOnce::new(),
        }
    }

    /// Platform this hook was built for.
    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> &PlatformDescriptor {
        &self.desc
    }

    /// Start of secure OCRAM: the resolved boundary, or the platform
    /// default before the first run.
    #[must_use]
    pub fn secure_boundary(&self) -> Paddr {
        self.boundary
            .get()
            .copied()
            .unwrap_or(self.desc.default_boundary)
    }

    /// Physical address of the TLB scratch buffer, once initialized.
    ///
    /// The suspend path programs this into the TTBR before DRAM enters
    /// self-refresh.
    #[must_use]
    pub fn tlb_phys_addr(&self) -> Option<Paddr> {
        self.tlb_phys.get().copied()
    }

    /// Returns true once a run has published the TLB address.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.tlb_phys.is_set()
    }

    /// Returns true if a run started but never completed.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.started.is_set() && !self.tlb_phys.is_set()
    }

    /// Initialize OCRAM once.
    ///
    /// `tree` is the device tree handed over by the previous stage, or
    /// `None` if there was none.
    ///
    /// # Errors
    ///
    /// Any [`FatalError`] from the locator, the partition register, the
    /// address mapping or the section writer. The caller must abort boot.
    /// Every run after a failed one returns [`FatalError::SentinelRewrite`].
    pub fn run<P, T>(
        &self,
        platform: &mut P,
        tree: Option<&mut T>,
        config: BootConfig,
    ) -> Result<BootOutcome, FatalError>
    where
        P: Platform,
        T: DeviceTree + DeviceTreeEditor,
    {
        if let Some(tlb) = self.tlb_phys_addr() {
            log::debug!("IRAM TLB already at {tlb}");
            return Ok(BootOutcome::AlreadyInitialized);
        }
        self.started.set(()).map_err(|_| sentinel_rewrite())?;

        let desc = &self.desc;
        let boundary = if config.device_tree {
            locator::resolve_boundary(tree.as_deref(), desc)?
        } else {
            locator::fixed_boundary(desc)
        };
        self.boundary.set(boundary).map_err(|_| sentinel_rewrite())?;

        let gpr_value = partition::configure_and_lock(platform, &desc.gpr, boundary)?;

        let handoff = match tree {
            Some(tree) if config.device_tree && config.handoff => {
                Some(handoff::apply(tree, desc.handoff))
            }
            _ => None,
        };

        let tlb_phys = desc.tlb_phys(boundary);
        let Some(tlb_virt) = platform.phys_to_virt(tlb_phys, AreaType::TeeCoherent, TLB_BUFFER_SIZE)
        else {
            let err = FatalError::Unmapped {
                paddr: tlb_phys,
                area: AreaType::TeeCoherent,
            };
            log::error!("{err}");
            return Err(err);
        };
        log::debug!("IRAM TLB phys {tlb_phys} virt {tlb_virt}");
        platform.zero(tlb_virt, TLB_BUFFER_SIZE);

        let mut table = SectionTable::new(tlb_virt);
        let regions = mapping::build(platform, desc, tlb_phys, &mut table)?;
        self.tlb_phys.set(tlb_phys).map_err(|_| sentinel_rewrite())?;
        log::info!("{}: {regions} secure regions mapped in IRAM TLB", desc.name);

        Ok(BootOutcome::Initialized(BootSummary {
            boundary,
            gpr_value,
            tlb_phys,
            tlb_virt,
            regions,
            handoff,
        }))
    }
}

fn sentinel_rewrite() -> FatalError {
    let err = FatalError::SentinelRewrite;
    log::error!("{err}");
    err
}

static OCRAM: OcramBoot = OcramBoot::new(IMX7);

/// The global i.MX7 boot hook.
#[must_use]
pub fn ocram() -> &'static OcramBoot {
    &OCRAM
}

/// Start of secure OCRAM on i.MX7.
#[must_use]
pub fn secure_boundary() -> Paddr {
    OCRAM.secure_boundary()
}

/// Physical address of the i.MX7 TLB scratch buffer, once initialized.
#[must_use]
pub fn tlb_phys_addr() -> Option<Paddr> {
    OCRAM.tlb_phys_addr()
}

/// Registered service initializer.
///
/// Runs the global hook with [`BootConfig::DEFAULT`]. Returning means
/// success; any inconsistency aborts boot.
#[expect(
    clippy::panic,
    reason = "a partially partitioned OCRAM must never reach the OS"
)]
pub fn init_ocram<P, T>(platform: &mut P, tree: Option<&mut T>)
where
    P: Platform,
    T: DeviceTree + DeviceTreeEditor,
{
    if let Err(err) = OCRAM.run(platform, tree, BootConfig::DEFAULT) {
        panic!("OCRAM initialization failed: {err}");
    }
}
