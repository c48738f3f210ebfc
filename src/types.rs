multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::errors::CampaignError;
use crate::guards::{is_contributor, is_within_funding_window};

// ============================================================
// Campaign Status: derived, never stored
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum CampaignStatus {
    /// Before the deadline. Contributions and votes are accepted.
    FundingOpen,
    /// Deadline passed, nobody has called finalize yet.
    AwaitingFinalization,
    /// Finalized with strictly more yes than no votes.
    Approved,
    /// Finalized with a tie or a no majority.
    Declined,
}

// ============================================================
// Proposal: the single campaign record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub goal: BigUint<M>,
    pub description: ManagedBuffer<M>,
    /// Block timestamp at which funding and voting close
    pub deadline: u64,
    pub vote_yes: u64,
    pub vote_no: u64,
    pub executed: bool,
    pub approved: bool,
    pub declined: bool,
}

impl<M: ManagedTypeApi> Proposal<M> {
    pub fn new(goal: BigUint<M>, description: ManagedBuffer<M>, deadline: u64) -> Self {
        Proposal {
            goal,
            description,
            deadline,
            vote_yes: 0,
            vote_no: 0,
            executed: false,
            approved: false,
            declined: false,
        }
    }

    pub fn status(&self, now: u64) -> CampaignStatus {
        if self.executed {
            if self.approved {
                CampaignStatus::Approved
            } else {
                CampaignStatus::Declined
            }
        } else if is_within_funding_window(now, self.deadline) {
            CampaignStatus::FundingOpen
        } else {
            CampaignStatus::AwaitingFinalization
        }
    }

    pub fn goal_reached(&self, custodied: &BigUint<M>) -> bool {
        *custodied >= self.goal
    }

    pub fn total_votes(&self) -> u64 {
        self.vote_yes + self.vote_no
    }

    pub fn ensure_funding_open(&self, now: u64) -> Result<(), CampaignError<M>> {
        if is_within_funding_window(now, self.deadline) {
            Ok(())
        } else {
            Err(CampaignError::FundingClosed)
        }
    }

    pub fn check_contribution(
        &self,
        now: u64,
        amount: &BigUint<M>,
        minimum: &BigUint<M>,
    ) -> Result<(), CampaignError<M>> {
        self.ensure_funding_open(now)?;
        if *amount < *minimum {
            return Err(CampaignError::ContributionTooLow {
                amount: amount.clone(),
                minimum: minimum.clone(),
            });
        }
        Ok(())
    }

    /// Counts one vote for a contributor, whatever the size of their stake.
    pub fn cast_vote(
        &mut self,
        now: u64,
        ledger_balance: &BigUint<M>,
        already_voted: bool,
        support: bool,
    ) -> Result<(), CampaignError<M>> {
        if !is_contributor(ledger_balance) {
            return Err(CampaignError::AccessDenied);
        }
        self.ensure_funding_open(now)?;
        if already_voted {
            return Err(CampaignError::AlreadyVoted);
        }
        if self.executed {
            return Err(CampaignError::AlreadyFinalized);
        }

        if support {
            self.vote_yes += 1;
        } else {
            self.vote_no += 1;
        }
        Ok(())
    }

    /// Fixes the outcome once. A tie is declined.
    /// Returns whether the proposal was approved.
    pub fn finalize(&mut self, now: u64) -> Result<bool, CampaignError<M>> {
        if is_within_funding_window(now, self.deadline) {
            return Err(CampaignError::StillInFundingPeriod);
        }
        if self.executed {
            return Err(CampaignError::AlreadyFinalized);
        }

        let approved = self.vote_yes > self.vote_no;
        self.executed = true;
        self.approved = approved;
        self.declined = !approved;
        Ok(approved)
    }

    /// Refunds are open once finalized, unless the proposal was approved and
    /// the contract still holds at least the goal.
    pub fn check_refund(
        &self,
        amount: &BigUint<M>,
        ledger_balance: &BigUint<M>,
        custodied: &BigUint<M>,
    ) -> Result<(), CampaignError<M>> {
        if *amount == 0u64 {
            return Err(CampaignError::InvalidAmount);
        }
        if *ledger_balance < *amount {
            return Err(CampaignError::InsufficientBalance {
                requested: amount.clone(),
                available: ledger_balance.clone(),
            });
        }
        if !self.executed {
            return Err(CampaignError::ProposalNotFinalized);
        }
        if self.approved && self.goal_reached(custodied) {
            return Err(CampaignError::ProposalApproved);
        }
        if *custodied < *amount {
            return Err(CampaignError::ContractInsufficientBalance {
                requested: amount.clone(),
                available: custodied.clone(),
            });
        }
        Ok(())
    }

    /// Owner access is checked by the caller before this.
    pub fn check_withdraw_all(&self, custodied: &BigUint<M>) -> Result<(), CampaignError<M>> {
        if !self.executed {
            return Err(CampaignError::ProposalNotFinalized);
        }
        if !self.goal_reached(custodied) {
            return Err(CampaignError::GoalNotReached);
        }
        if !self.approved {
            return Err(CampaignError::ProposalNotApproved);
        }
        Ok(())
    }
}
