#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod governed_crowdfund_proxy;
pub mod guards;
pub mod types;

use errors::CampaignError;
use types::{CampaignStatus, Proposal};

// ============================================================
// Contract
// ============================================================

/// Pooled funding toward a goal, a one-shot yes/no vote among contributors,
/// and exactly one settlement path afterwards: contributor refunds, or the
/// owner sweeping the balance.
///
/// Every endpoint runs as one VM transaction. Rules are checked first, state
/// is written next, the EGLD transfer comes last, and any error signal reverts
/// the lot.
#[multiversx_sc::contract]
pub trait GovernedCrowdfund: errors::ErrorSignalModule + guards::GuardsModule {
    // ========================================================
    // Init
    // ========================================================

    #[init]
    fn init(
        &self,
        goal: BigUint,
        owner: ManagedAddress,
        description: ManagedBuffer,
        duration: u64,
        minimum_contribution: BigUint,
    ) {
        if owner.is_zero() {
            self.signal(CampaignError::InvalidOwner);
        }
        if duration == 0 {
            self.signal(CampaignError::InvalidDuration);
        }
        let now = self.blockchain().get_block_timestamp();
        let deadline = match now.checked_add(duration) {
            Some(deadline) => deadline,
            None => self.signal(CampaignError::InvalidDuration),
        };

        self.owner().set(&owner);
        self.minimum_contribution().set(&minimum_contribution);
        self.proposal().set(Proposal::new(goal, description, deadline));
        self.settlement_locked().set(false);
        self.total_withdrawn().set(BigUint::zero());
    }

    // ========================================================
    // ENDPOINT: contribute / deposit
    // Both credit the attached EGLD to the caller's ledger entry.
    // `deposit` is the plain-transfer entry and shares every check.
    // ========================================================

    #[endpoint(contribute)]
    #[payable("EGLD")]
    fn contribute(&self) {
        self.accept_contribution();
    }

    #[endpoint(deposit)]
    #[payable("EGLD")]
    fn deposit(&self) {
        self.accept_contribution();
    }

    // ========================================================
    // ENDPOINT: vote
    // One identity, one vote, unweighted.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, support: bool) {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();
        let ledger_balance = self.contribution(&caller).get();
        let already_voted = self.voters().contains(&caller);

        let mut proposal = self.proposal().get();
        self.require_ok(proposal.cast_vote(now, &ledger_balance, already_voted, support));

        self.voters().insert(caller.clone());
        self.proposal().set(&proposal);

        self.voted_event(&caller, support);
    }

    // ========================================================
    // ENDPOINT: finalize
    // Permissionless: the outcome depends only on stored votes and
    // the clock, so any caller may trigger it after the deadline.
    // ========================================================

    #[endpoint(finalize)]
    fn finalize(&self) {
        let now = self.blockchain().get_block_timestamp();
        let mut proposal = self.proposal().get();
        let approved = self.require_ok(proposal.finalize(now));
        self.proposal().set(&proposal);

        self.finalized_event(
            approved,
            proposal.vote_yes,
            proposal.vote_no,
            proposal.total_votes(),
        );
    }

    // ========================================================
    // ENDPOINT: refund
    // Partial or full. The ledger is debited before the transfer;
    // a failed transfer reverts the debit with the rest of the call.
    // ========================================================

    #[endpoint(refund)]
    fn refund(&self, amount: BigUint) {
        self.with_settlement_lock(|| {
            let caller = self.blockchain().get_caller();
            let ledger_balance = self.contribution(&caller).get();
            let custodied = self.custodied_balance();
            let proposal = self.proposal().get();
            self.require_ok(proposal.check_refund(&amount, &ledger_balance, &custodied));

            self.contribution(&caller).set(&ledger_balance - &amount);
            self.require_ok(self.transfer_egld(&caller, &amount));

            self.refunded_event(&caller, &amount);
        });
    }

    // ========================================================
    // ENDPOINT: withdrawAll
    // Owner sweeps the whole balance after an approved, funded vote.
    // Ledger entries are left untouched; `totalWithdrawn` records the
    // swept amount instead.
    // ========================================================

    #[endpoint(withdrawAll)]
    fn withdraw_all(&self) {
        self.with_settlement_lock(|| {
            let caller = self.blockchain().get_caller();
            self.require_ok(self.require_owner(&caller));

            let custodied = self.custodied_balance();
            let proposal = self.proposal().get();
            self.require_ok(proposal.check_withdraw_all(&custodied));

            // only reachable again with a zero goal; nothing left to move
            if custodied == 0u64 {
                return;
            }

            self.total_withdrawn().update(|withdrawn| *withdrawn += &custodied);
            self.require_ok(self.transfer_egld(&caller, &custodied));

            self.withdraw_all_event(&caller, &custodied);
        });
    }

    // ========================================================
    // ENDPOINT: setMinimum
    // ========================================================

    #[endpoint(setMinimum)]
    fn set_minimum(&self, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.require_ok(self.require_owner(&caller));

        let now = self.blockchain().get_block_timestamp();
        self.require_ok(self.proposal().get().ensure_funding_open(now));

        self.minimum_contribution().set(&amount);
        self.minimum_contribution_changed_event(&amount);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn accept_contribution(&self) {
        let caller = self.blockchain().get_caller();
        let amount = self.call_value().egld_value().clone_value();
        let now = self.blockchain().get_block_timestamp();
        let minimum = self.minimum_contribution().get();

        let proposal = self.proposal().get();
        self.require_ok(proposal.check_contribution(now, &amount, &minimum));

        if amount > 0u64 {
            self.contribution(&caller).update(|balance| *balance += &amount);
            self.contributors().insert(caller.clone());
        }

        self.funded_event(&caller, &amount);
    }

    fn custodied_balance(&self) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0)
    }

    /// Plain EGLD transfer that reports failure instead of aborting.
    fn transfer_egld(
        &self,
        to: &ManagedAddress,
        amount: &BigUint,
    ) -> Result<(), CampaignError<Self::Api>> {
        let result = self.send_raw().direct_egld_execute(
            to,
            amount,
            0,
            &ManagedBuffer::new(),
            &ManagedArgBuffer::new(),
        );
        CampaignError::from_transfer(result)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getStatus)]
    fn get_status(&self) -> CampaignStatus {
        let now = self.blockchain().get_block_timestamp();
        self.proposal().get().status(now)
    }

    #[view(getCustodiedBalance)]
    fn get_custodied_balance(&self) -> BigUint {
        self.custodied_balance()
    }

    #[view(getContribution)]
    fn get_contribution(&self, contributor: &ManagedAddress) -> BigUint {
        self.contribution(contributor).get()
    }

    #[view(getProposal)]
    fn get_proposal(&self) -> Proposal<Self::Api> {
        self.proposal().get()
    }

    #[view(getMinimumContribution)]
    fn get_minimum_contribution(&self) -> BigUint {
        self.minimum_contribution().get()
    }

    #[view(hasVoted)]
    fn has_voted(&self, voter: &ManagedAddress) -> bool {
        self.voters().contains(voter)
    }

    #[view(getVoterCount)]
    fn get_voter_count(&self) -> usize {
        self.voters().len()
    }

    #[view(getTotalWithdrawn)]
    fn get_total_withdrawn(&self) -> BigUint {
        self.total_withdrawn().get()
    }

    #[view(getContributors)]
    fn get_contributors(&self, from: u64, count: u64) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        let total = self.contributors().len() as u64;
        let end = core::cmp::min(from.saturating_add(count), total);

        for (idx, contributor) in (0u64..).zip(self.contributors().iter()) {
            if idx >= end {
                break;
            }
            if idx >= from {
                result.push(contributor);
            }
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("funded")]
    fn funded_event(&self, #[indexed] contributor: &ManagedAddress, #[indexed] amount: &BigUint);

    #[event("voted")]
    fn voted_event(&self, #[indexed] voter: &ManagedAddress, #[indexed] support: bool);

    #[event("finalized")]
    fn finalized_event(
        &self,
        #[indexed] approved: bool,
        #[indexed] vote_yes: u64,
        #[indexed] vote_no: u64,
        #[indexed] total_votes: u64,
    );

    #[event("refunded")]
    fn refunded_event(&self, #[indexed] contributor: &ManagedAddress, #[indexed] amount: &BigUint);

    #[event("withdrawAll")]
    fn withdraw_all_event(&self, #[indexed] owner: &ManagedAddress, #[indexed] amount: &BigUint);

    #[event("minimumContributionChanged")]
    fn minimum_contribution_changed_event(&self, #[indexed] amount: &BigUint);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("minimumContribution")]
    fn minimum_contribution(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("proposal")]
    fn proposal(&self) -> SingleValueMapper<Proposal<Self::Api>>;

    // ── Ledger ──

    #[storage_mapper("contribution")]
    fn contribution(&self, contributor: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("contributors")]
    fn contributors(&self) -> UnorderedSetMapper<ManagedAddress>;

    // ── Votes ──

    #[storage_mapper("voters")]
    fn voters(&self) -> UnorderedSetMapper<ManagedAddress>;

    // ── Settlement ──

    #[storage_mapper("totalWithdrawn")]
    fn total_withdrawn(&self) -> SingleValueMapper<BigUint>;
}
