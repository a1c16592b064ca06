use crate::outcome::{play_round, Round};
use crate::{Choice, GameError, Result};
use arcade_core::ClaimPolicy;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    RoundComplete,
}

/// Copy of the session state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_round: Option<Round>,
    pub prize_eligible: bool,
    pub claim_modal_open: bool,
    pub prize_claimed: bool,
}

/// The single mutable aggregate of one game session.
///
/// `choose`, `open_claim_modal`, `dismiss_claim_modal`, `mark_prize_claimed`
/// and `reset` are the only mutation paths. A rejected transition leaves
/// every field as it was.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    policy: ClaimPolicy,
    current_round: Option<Round>,
    claim_modal_open: bool,
    prize_claimed: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_policy(ClaimPolicy::default())
    }

    pub fn with_policy(policy: ClaimPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            policy,
            current_round: None,
            claim_modal_open: false,
            prize_claimed: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn policy(&self) -> ClaimPolicy {
        self.policy
    }

    pub fn phase(&self) -> SessionPhase {
        match self.current_round {
            Some(_) => SessionPhase::RoundComplete,
            None => SessionPhase::Idle,
        }
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    /// Derived from the live round, so it can never disagree with it.
    pub fn prize_eligible(&self) -> bool {
        self.current_round.as_ref().is_some_and(Round::is_win)
    }

    pub fn claim_modal_open(&self) -> bool {
        self.claim_modal_open
    }

    pub fn prize_claimed(&self) -> bool {
        self.prize_claimed
    }

    pub fn can_open_claim_modal(&self) -> bool {
        self.prize_eligible() && !self.prize_claimed
    }

    /// Play a fresh round, replacing any previous one.
    ///
    /// Under [`ClaimPolicy::PerSession`] an earlier claim keeps blocking the
    /// prize even if this round is won.
    pub fn choose<R: RngCore + ?Sized>(&mut self, player: Choice, rng: &mut R) -> Result<&Round> {
        let round = play_round(player, rng)?;

        tracing::info!(
            "Session {}: {} vs {} -> {}",
            self.id,
            round.player_choice(),
            round.computer_choice(),
            round.outcome()
        );

        self.claim_modal_open = false;
        if self.policy == ClaimPolicy::PerRound {
            self.prize_claimed = false;
        }

        Ok(&*self.current_round.insert(round))
    }

    pub fn open_claim_modal(&mut self) -> Result<()> {
        if !self.prize_eligible() {
            tracing::warn!("Session {}: claim requested without a winning round", self.id);
            return Err(GameError::ClaimUnavailable(
                "the current round is not a win".to_string(),
            ));
        }

        if self.prize_claimed {
            tracing::warn!("Session {}: claim requested after prize was claimed", self.id);
            return Err(GameError::ClaimUnavailable(
                "the prize has already been claimed".to_string(),
            ));
        }

        self.claim_modal_open = true;
        tracing::debug!("Session {}: claim modal opened", self.id);
        Ok(())
    }

    /// Close the claim modal without claiming.
    pub fn dismiss_claim_modal(&mut self) {
        if self.claim_modal_open {
            self.claim_modal_open = false;
            tracing::debug!("Session {}: claim modal dismissed", self.id);
        }
    }

    /// Record a successful claim. Driven by the claim submitter, not the player.
    pub fn mark_prize_claimed(&mut self) -> Result<()> {
        if !self.claim_modal_open {
            return Err(GameError::InvalidState(
                "prize can only be marked claimed while the claim modal is open".to_string(),
            ));
        }

        self.prize_claimed = true;
        self.claim_modal_open = false;
        tracing::info!("Session {}: prize claimed", self.id);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current_round = None;
        self.claim_modal_open = false;
        self.prize_claimed = false;
        tracing::debug!("Session {}: reset", self.id);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            current_round: self.current_round.clone(),
            prize_eligible: self.prize_eligible(),
            claim_modal_open: self.claim_modal_open,
            prize_claimed: self.prize_claimed,
        }
    }
}
