multiversx_sc::imports!();

use multiversx_sc::api::StorageMapperApi;

use crate::errors::CampaignError;

// ============================================================
// Access predicates
// ============================================================

pub fn is_owner<M: ManagedTypeApi>(owner: &ManagedAddress<M>, caller: &ManagedAddress<M>) -> bool {
    owner == caller
}

pub fn is_contributor<M: ManagedTypeApi>(ledger_balance: &BigUint<M>) -> bool {
    *ledger_balance > 0u64
}

pub fn is_within_funding_window(now: u64, deadline: u64) -> bool {
    now < deadline
}

// ============================================================
// Reentrancy lock
// ============================================================

/// The single shared flag a [`ReentrancyLock`] raises while it is held.
pub trait ExclusionFlag {
    fn is_raised(&self) -> bool;

    fn raise(&self);

    fn lower(&self);
}

impl<SA> ExclusionFlag for SingleValueMapper<SA, bool>
where
    SA: StorageMapperApi,
{
    fn is_raised(&self) -> bool {
        self.get()
    }

    fn raise(&self) {
        self.set(true);
    }

    fn lower(&self) {
        self.set(false);
    }
}

/// Holds the exclusion flag raised until [`ReentrancyLock::release`].
///
/// Acquiring while the flag is already raised fails with
/// [`CampaignError::Reentered`]. Release is explicit and happens only on a
/// normal exit. An error signal unwinds past it and the VM reverts the whole
/// call, flag write included, so nothing touches storage during unwinding.
#[must_use]
pub struct ReentrancyLock<F: ExclusionFlag> {
    flag: F,
}

impl<F: ExclusionFlag> ReentrancyLock<F> {
    pub fn acquire<M: ManagedTypeApi>(flag: F) -> Result<Self, CampaignError<M>> {
        if flag.is_raised() {
            return Err(CampaignError::Reentered);
        }
        flag.raise();
        Ok(ReentrancyLock { flag })
    }

    pub fn release(self) {
        self.flag.lower();
    }
}

pub type SettlementLock<SA> = ReentrancyLock<SingleValueMapper<SA, bool>>;

// ============================================================
// Guards module
// ============================================================

#[multiversx_sc::module]
pub trait GuardsModule: crate::errors::ErrorSignalModule {
    fn require_owner(&self, caller: &ManagedAddress) -> Result<(), CampaignError<Self::Api>> {
        if is_owner(&self.owner().get(), caller) {
            Ok(())
        } else {
            Err(CampaignError::AccessDenied)
        }
    }

    fn lock_settlement(&self) -> Result<SettlementLock<Self::Api>, CampaignError<Self::Api>> {
        ReentrancyLock::acquire(self.settlement_locked())
    }

    /// Runs `body` with the settlement flag raised. Any settlement entered
    /// meanwhile fails with `Reentered`; the flag is lowered once `body`
    /// returns.
    fn with_settlement_lock<R, B: FnOnce() -> R>(&self, body: B) -> R {
        let lock = self.require_ok(self.lock_settlement());
        let result = body();
        lock.release();
        result
    }

    #[view(getOwner)]
    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(isSettlementLocked)]
    #[storage_mapper("settlementLocked")]
    fn settlement_locked(&self) -> SingleValueMapper<bool>;
}
