multiversx_sc::imports!();

// ============================================================
// Error messages
// ============================================================

pub const ERR_ACCESS_DENIED: &str = "access denied";
pub const ERR_REENTERED: &str = "reentrant call";
pub const ERR_FUNDING_CLOSED: &str = "funding period closed";
pub const ERR_STILL_IN_FUNDING_PERIOD: &str = "still in funding period";
pub const ERR_ALREADY_VOTED: &str = "already voted";
pub const ERR_ALREADY_FINALIZED: &str = "proposal already finalized";
pub const ERR_PROPOSAL_NOT_FINALIZED: &str = "proposal not finalized";
pub const ERR_PROPOSAL_APPROVED: &str = "proposal approved and goal reached";
pub const ERR_PROPOSAL_NOT_APPROVED: &str = "proposal not approved";
pub const ERR_GOAL_NOT_REACHED: &str = "goal not reached";
pub const ERR_CONTRIBUTION_TOO_LOW: &str = "contribution too low";
pub const ERR_INVALID_AMOUNT: &str = "invalid amount: 0";
pub const ERR_INSUFFICIENT_BALANCE: &str = "insufficient balance";
pub const ERR_CONTRACT_INSUFFICIENT_BALANCE: &str = "insufficient contract balance";
pub const ERR_TRANSFER_FAILED: &str = "transfer failed";
pub const ERR_INVALID_OWNER: &str = "invalid owner";
pub const ERR_INVALID_DURATION: &str = "invalid duration";

// ============================================================
// CampaignError: every way a call can fail
// ============================================================

/// Typed failure of a campaign operation.
///
/// Rules on [`crate::types::Proposal`] and the guards return these; the
/// contract turns them into a VM error signal, which reverts every write made
/// by the failing call.
pub enum CampaignError<M: ManagedTypeApi> {
    // ── Access ──
    AccessDenied,
    Reentered,

    // ── Timing ──
    FundingClosed,
    StillInFundingPeriod,

    // ── Proposal state ──
    AlreadyVoted,
    AlreadyFinalized,
    ProposalNotFinalized,
    ProposalApproved,
    ProposalNotApproved,
    GoalNotReached,

    // ── Values ──
    ContributionTooLow {
        amount: BigUint<M>,
        minimum: BigUint<M>,
    },
    InvalidAmount,
    InsufficientBalance {
        requested: BigUint<M>,
        available: BigUint<M>,
    },
    ContractInsufficientBalance {
        requested: BigUint<M>,
        available: BigUint<M>,
    },

    // ── Transfer ──
    TransferFailed,

    // ── Construction ──
    InvalidOwner,
    InvalidDuration,
}

impl<M: ManagedTypeApi> CampaignError<M> {
    /// Static part of the error message. Parameterized variants append their
    /// values when signalled.
    pub fn message(&self) -> &'static str {
        match self {
            CampaignError::AccessDenied => ERR_ACCESS_DENIED,
            CampaignError::Reentered => ERR_REENTERED,
            CampaignError::FundingClosed => ERR_FUNDING_CLOSED,
            CampaignError::StillInFundingPeriod => ERR_STILL_IN_FUNDING_PERIOD,
            CampaignError::AlreadyVoted => ERR_ALREADY_VOTED,
            CampaignError::AlreadyFinalized => ERR_ALREADY_FINALIZED,
            CampaignError::ProposalNotFinalized => ERR_PROPOSAL_NOT_FINALIZED,
            CampaignError::ProposalApproved => ERR_PROPOSAL_APPROVED,
            CampaignError::ProposalNotApproved => ERR_PROPOSAL_NOT_APPROVED,
            CampaignError::GoalNotReached => ERR_GOAL_NOT_REACHED,
            CampaignError::ContributionTooLow { .. } => ERR_CONTRIBUTION_TOO_LOW,
            CampaignError::InvalidAmount => ERR_INVALID_AMOUNT,
            CampaignError::InsufficientBalance { .. } => ERR_INSUFFICIENT_BALANCE,
            CampaignError::ContractInsufficientBalance { .. } => ERR_CONTRACT_INSUFFICIENT_BALANCE,
            CampaignError::TransferFailed => ERR_TRANSFER_FAILED,
            CampaignError::InvalidOwner => ERR_INVALID_OWNER,
            CampaignError::InvalidDuration => ERR_INVALID_DURATION,
        }
    }

    /// Maps the outcome of a host transfer. The host's error carries nothing
    /// the caller can act on, so every failure becomes `TransferFailed`.
    pub fn from_transfer<E>(result: Result<(), E>) -> Result<(), Self> {
        result.map_err(|_| CampaignError::TransferFailed)
    }
}

// ============================================================
// Signalling
// ============================================================

#[multiversx_sc::module]
pub trait ErrorSignalModule {
    /// Aborts the current call with the error's message. The VM discards
    /// every storage write and payment of the call.
    fn signal(&self, error: CampaignError<Self::Api>) -> ! {
        match error {
            CampaignError::ContributionTooLow { amount, minimum } => {
                sc_panic!("contribution too low: {}, minimum {}", amount, minimum)
            }
            CampaignError::InsufficientBalance {
                requested,
                available,
            } => {
                sc_panic!(
                    "insufficient balance: requested {}, available {}",
                    requested,
                    available
                )
            }
            CampaignError::ContractInsufficientBalance {
                requested,
                available,
            } => {
                sc_panic!(
                    "insufficient contract balance: requested {}, available {}",
                    requested,
                    available
                )
            }
            other => sc_panic!(other.message()),
        }
    }

    fn require_ok<T>(&self, result: Result<T, CampaignError<Self::Api>>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.signal(error),
        }
    }
}
