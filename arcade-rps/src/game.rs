use crate::session::{GameSession, SessionSnapshot};
use crate::{Choice, GameError, Result, Round};
use arcade_core::{
    AccountProvider, Address, ArcadeConfig, BalanceReader, ClaimReceipt, ClaimSubmitter,
    TokenBalance,
};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// A game session bound to the wallet collaborators.
///
/// Every game action requires a connected account. When the provider starts
/// reporting a different account (or none), the session is reset before the
/// next action so no round or prize state leaks across accounts.
pub struct RpsGame<R = StdRng> {
    config: ArcadeConfig,
    accounts: Arc<dyn AccountProvider>,
    balances: Arc<dyn BalanceReader>,
    claims: Arc<dyn ClaimSubmitter>,
    session: GameSession,
    bound_account: Option<Address>,
    rng: R,
}

impl RpsGame<StdRng> {
    /// Creates a game whose house moves come from an OS-seeded generator.
    pub fn new(
        config: ArcadeConfig,
        accounts: Arc<dyn AccountProvider>,
        balances: Arc<dyn BalanceReader>,
        claims: Arc<dyn ClaimSubmitter>,
    ) -> Result<Self> {
        let rng = StdRng::from_rng(OsRng).map_err(|e| GameError::Randomness(e.to_string()))?;
        Self::with_rng(config, accounts, balances, claims, rng)
    }
}

impl<R: RngCore> RpsGame<R> {
    pub fn with_rng(
        config: ArcadeConfig,
        accounts: Arc<dyn AccountProvider>,
        balances: Arc<dyn BalanceReader>,
        claims: Arc<dyn ClaimSubmitter>,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let session = GameSession::with_policy(config.prize.policy);

        Ok(Self {
            config,
            accounts,
            balances,
            claims,
            session,
            bound_account: None,
            rng,
        })
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    /// The session, after resetting it if the provider's account changed.
    pub fn session(&mut self) -> &GameSession {
        self.sync_account();
        &self.session
    }

    pub fn snapshot(&mut self) -> SessionSnapshot {
        self.sync_account();
        self.session.snapshot()
    }

    /// The connected account, if any.
    pub fn account(&mut self) -> Option<Address> {
        self.sync_account()
    }

    fn sync_account(&mut self) -> Option<Address> {
        let current = self.accounts.current_address();
        if current != self.bound_account {
            if self.bound_account.is_some() {
                tracing::info!(
                    "Account changed, resetting session {}",
                    self.session.id()
                );
                self.session.reset();
            }
            self.bound_account = current.clone();
        }
        current
    }

    fn require_account(&mut self) -> Result<Address> {
        self.account().ok_or(GameError::NotConnected)
    }

    pub async fn balance(&mut self) -> Result<TokenBalance> {
        let account = self.require_account()?;
        let balance = self
            .balances
            .balance_of(&account, &self.config.token)
            .await?;
        Ok(balance)
    }

    pub fn choose(&mut self, choice: Choice) -> Result<Round> {
        self.require_account()?;
        let round = self.session.choose(choice, &mut self.rng)?;
        Ok(round.clone())
    }

    pub fn open_claim_modal(&mut self) -> Result<()> {
        self.require_account()?;
        self.session.open_claim_modal()
    }

    pub fn dismiss_claim_modal(&mut self) {
        self.sync_account();
        self.session.dismiss_claim_modal();
    }

    /// Submit the prize transfer for the open claim.
    ///
    /// On failure the claim modal stays open and the prize stays unclaimed, so
    /// the caller can surface the error and retry.
    pub async fn claim_prize(&mut self) -> Result<ClaimReceipt> {
        let account = self.require_account()?;

        if !self.session.claim_modal_open() {
            return Err(GameError::ClaimUnavailable(
                "open the claim modal after a winning round first".to_string(),
            ));
        }

        let amount = self.config.prize_amount()?;
        let claims = self.claims.clone();

        match claims.claim_to(&account, &self.config.token, amount).await {
            Ok(receipt) => {
                self.session.mark_prize_claimed()?;
                tracing::info!(
                    "Prize of {} {} claimed by {} in tx {}",
                    amount.display(self.config.token.decimals),
                    self.config.token.symbol,
                    account.shorten(),
                    receipt.tx_hash
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("Prize claim for {} failed: {}", account.shorten(), e);
                Err(e.into())
            }
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Ends the account session and drops all round and prize state.
    pub fn disconnect(&mut self) {
        self.accounts.disconnect();
        self.session.reset();
        self.bound_account = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::{AccountManager, ArcadeError, ClaimPolicy, TokenContract, TokenLedger};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Claim submitter that fails while `failing` is set, then delegates.
    struct FlakyClaims {
        failing: AtomicBool,
        ledger: Arc<TokenLedger>,
    }

    #[async_trait]
    impl ClaimSubmitter for FlakyClaims {
        async fn claim_to(
            &self,
            account: &Address,
            contract: &TokenContract,
            amount: arcade_core::TokenAmount,
        ) -> arcade_core::Result<ClaimReceipt> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ArcadeError::claim("transaction reverted"));
            }
            self.ledger.claim_to(account, contract, amount).await
        }
    }

    struct Fixture {
        game: RpsGame,
        accounts: Arc<AccountManager>,
        ledger: Arc<TokenLedger>,
    }

    fn fixture_with(config: ArcadeConfig, claims: Option<Arc<dyn ClaimSubmitter>>) -> Fixture {
        let accounts = Arc::new(AccountManager::in_memory());
        let ledger = Arc::new(TokenLedger::in_memory(config.chain.id));
        let claims = claims.unwrap_or_else(|| ledger.clone() as Arc<dyn ClaimSubmitter>);
        let game = RpsGame::with_rng(
            config,
            accounts.clone(),
            ledger.clone(),
            claims,
            StdRng::seed_from_u64(99),
        )
        .unwrap();

        Fixture {
            game,
            accounts,
            ledger,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(ArcadeConfig::default(), None)
    }

    fn win(game: &mut RpsGame) {
        for _ in 0..200 {
            if game.choose(Choice::Rock).unwrap().is_win() {
                return;
            }
        }
        panic!("no winning round in 200 draws");
    }

    #[tokio::test]
    async fn test_actions_require_connected_account() {
        let mut f = fixture();

        assert!(f.game.account().is_none());
        assert!(matches!(
            f.game.choose(Choice::Rock),
            Err(GameError::NotConnected)
        ));
        assert!(matches!(
            f.game.open_claim_modal(),
            Err(GameError::NotConnected)
        ));
        assert!(matches!(
            f.game.claim_prize().await,
            Err(GameError::NotConnected)
        ));
        assert!(matches!(
            f.game.balance().await,
            Err(GameError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_win_and_claim_prize() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();

        let before = f.game.balance().await.unwrap();
        assert!(before.amount.is_zero());

        win(&mut f.game);
        f.game.open_claim_modal().unwrap();
        let receipt = f.game.claim_prize().await.unwrap();

        assert_eq!(Some(receipt.account), f.game.account());
        let snapshot = f.game.snapshot();
        assert!(snapshot.prize_claimed);
        assert!(!snapshot.claim_modal_open);

        let after = f.game.balance().await.unwrap();
        assert_eq!(after.display_value(), "10");
    }

    #[tokio::test]
    async fn test_claim_requires_open_modal() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);

        assert!(matches!(
            f.game.claim_prize().await,
            Err(GameError::ClaimUnavailable(_))
        ));
        assert!(!f.game.session().prize_claimed());
    }

    #[tokio::test]
    async fn test_failed_claim_keeps_modal_open_for_retry() {
        let config = ArcadeConfig::default();
        let ledger = Arc::new(TokenLedger::in_memory(config.chain.id));
        let flaky = Arc::new(FlakyClaims {
            failing: AtomicBool::new(true),
            ledger: ledger.clone(),
        });
        let mut f = fixture_with(config, Some(flaky.clone() as Arc<dyn ClaimSubmitter>));
        f.accounts.connect("alice").await.unwrap();

        win(&mut f.game);
        f.game.open_claim_modal().unwrap();
        let before = f.game.snapshot();

        let result = f.game.claim_prize().await;
        assert!(matches!(result, Err(GameError::Arcade(ArcadeError::Claim(_)))));
        assert_eq!(f.game.snapshot(), before);
        assert!(f.game.session().claim_modal_open());
        assert!(!f.game.session().prize_claimed());

        flaky.failing.store(false, Ordering::SeqCst);
        f.game.claim_prize().await.unwrap();
        assert!(f.game.session().prize_claimed());

        let address = f.game.account().unwrap();
        let balance = ledger.balance_of(&address, &f.game.config().token).await.unwrap();
        assert_eq!(balance.display_value(), "10");
        // the fixture's own ledger never saw the claim
        let untouched = f.ledger.balance_of(&address, &f.game.config().token).await.unwrap();
        assert!(untouched.amount.is_zero());
    }

    #[tokio::test]
    async fn test_disconnect_resets_session() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();

        f.game.disconnect();
        assert!(f.accounts.current_address().is_none());
        assert!(f.game.session().current_round().is_none());
        assert!(!f.game.session().claim_modal_open());
        assert!(matches!(
            f.game.choose(Choice::Paper),
            Err(GameError::NotConnected)
        ));
    }

    fn initial_snapshot() -> SessionSnapshot {
        SessionSnapshot {
            phase: crate::SessionPhase::Idle,
            current_round: None,
            prize_eligible: false,
            claim_modal_open: false,
            prize_claimed: false,
        }
    }

    #[tokio::test]
    async fn test_provider_disconnect_clears_snapshot() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();

        // the provider disconnects without going through the game
        f.accounts.disconnect();
        assert_eq!(f.game.snapshot(), initial_snapshot());
        assert!(f.game.session().current_round().is_none());
        assert!(f.game.account().is_none());
    }

    #[tokio::test]
    async fn test_provider_switch_clears_snapshot() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();

        f.accounts.connect("bob").await.unwrap();
        assert!(!f.game.session().claim_modal_open());
        assert_eq!(f.game.snapshot(), initial_snapshot());
    }

    #[tokio::test]
    async fn test_dismiss_after_provider_switch_keeps_fresh_session() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();

        f.accounts.connect("bob").await.unwrap();
        f.game.dismiss_claim_modal();
        assert_eq!(f.game.snapshot(), initial_snapshot());
        assert_eq!(f.game.account(), f.accounts.current_address());
    }

    #[tokio::test]
    async fn test_account_switch_resets_session() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();
        f.game.claim_prize().await.unwrap();

        f.accounts.connect("bob").await.unwrap();
        let bob = f.game.account().unwrap();
        assert_eq!(Some(&bob), f.accounts.active_account().as_ref().map(|a| a.address()));
        assert!(f.game.session().current_round().is_none());
        assert!(!f.game.session().prize_claimed());

        // a fresh session for bob can claim again
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();
        f.game.claim_prize().await.unwrap();
    }

    #[tokio::test]
    async fn test_per_session_policy_blocks_second_claim() {
        let mut f = fixture();
        f.accounts.connect("alice").await.unwrap();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();
        f.game.claim_prize().await.unwrap();

        win(&mut f.game);
        assert!(matches!(
            f.game.open_claim_modal(),
            Err(GameError::ClaimUnavailable(_))
        ));

        f.game.reset();
        win(&mut f.game);
        f.game.open_claim_modal().unwrap();
    }

    #[tokio::test]
    async fn test_per_round_policy_allows_claim_each_win() {
        let mut config = ArcadeConfig::default();
        config.prize.policy = ClaimPolicy::PerRound;
        let mut f = fixture_with(config, None);
        f.accounts.connect("alice").await.unwrap();

        for _ in 0..2 {
            win(&mut f.game);
            f.game.open_claim_modal().unwrap();
            f.game.claim_prize().await.unwrap();
        }

        let balance = f.game.balance().await.unwrap();
        assert_eq!(balance.display_value(), "20");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ArcadeConfig::default();
        config.prize.amount_tokens = 0;
        let accounts = Arc::new(AccountManager::in_memory());
        let ledger = Arc::new(TokenLedger::in_memory(config.chain.id));

        let result = RpsGame::new(config, accounts, ledger.clone(), ledger);
        assert!(matches!(result, Err(GameError::Arcade(ArcadeError::Config(_)))));
    }
}
