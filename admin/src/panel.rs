use crate::{
    dispatcher::{Action, ActionDispatcher, ActionInput},
    error::AdminError,
    network::{Handles, NetworkManager},
    reader::StateReader,
    session::Session,
    ui::{ControlState, Field, Presenter, ResultArea, Status},
};
use gpmf_common::{
    address::Address,
    chain::{ExplorerLinks, Network},
    i18n::{self, Locale, Text},
    lockup::{render_total_balance, LockupView},
    time::now_formatted,
    token::{format_native_balance, format_token_balance, ContractSnapshot},
    validation::validate_address,
};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

const EMPTY_FIELD: &str = "-";

#[derive(Default)]
struct PanelState {
    network: Network,
    handles: Option<Handles>,
    session: Option<Session>,
    snapshot: Option<ContractSnapshot>,
}

// Read-only view of the panel for status displays
#[derive(Debug, Clone)]
pub struct PanelStatus {
    pub network: Network,
    pub session: Option<Session>,
    pub snapshot: Option<ContractSnapshot>,
}

// Wires connection management, reads and actions to a presenter.
// Every handler reports its own failure and never returns an error.
pub struct AdminPanel {
    manager: NetworkManager,
    dispatcher: ActionDispatcher,
    presenter: Arc<dyn Presenter>,
    locale: Locale,
    state: RwLock<PanelState>,
}

impl AdminPanel {
    pub fn new(manager: NetworkManager, dispatcher: ActionDispatcher, presenter: Arc<dyn Presenter>, locale: Locale) -> Self {
        Self {
            manager,
            dispatcher,
            presenter,
            locale,
            state: RwLock::new(PanelState::default()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn text(&self, text: Text) -> &'static str {
        text.get(self.locale)
    }

    fn alert_error(&self, error: &AdminError) {
        self.presenter.alert(&error.friendly(self.locale));
    }

    // Initial presentation: nothing connected, everything but connect disabled
    pub async fn init(&self) {
        let state = self.state.read().await;
        self.presenter.set_text(Field::ConnectButton, self.text(Text::ConnectWallet));
        self.presenter.apply_controls(&ControlState::from_session(state.session.as_ref()));
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    // Explorer links are a control like any other: disabled while disconnected
    pub async fn links(&self) -> Option<ExplorerLinks> {
        self.connected().await.map(|(_, handles)| handles.links)
    }

    // User triggered refresh, unlike `refresh_all` it reminds to connect
    pub async fn refresh(&self) -> bool {
        if self.connected().await.is_none() {
            return false;
        }
        self.refresh_all().await;
        true
    }

    pub async fn status(&self) -> PanelStatus {
        let state = self.state.read().await;
        PanelStatus {
            network: state.network,
            session: state.session.clone(),
            snapshot: state.snapshot.clone(),
        }
    }

    // Session and handles of a connected wallet, or the reminder to connect
    async fn connected(&self) -> Option<(Session, Handles)> {
        let connected = self.connected_quiet().await;
        if connected.is_none() {
            self.presenter.alert(self.text(Text::ConnectWalletFirst));
        }
        connected
    }

    // Same as `connected` but silent, for background refreshes
    async fn connected_quiet(&self) -> Option<(Session, Handles)> {
        let state = self.state.read().await;
        let session = state.session.clone()?;
        let handles = state.handles.clone()?;
        Some((session, handles))
    }

    async fn apply_controls(&self) {
        let state = self.state.read().await;
        self.presenter.apply_controls(&ControlState::from_session(state.session.as_ref()));
    }

    // Ask the wallet to use the selected network and rebuild every handle
    pub async fn switch_to_target_network(&self) -> Option<Handles> {
        let network = self.state.read().await.network;
        match self.manager.switch_to(network).await {
            Ok(handles) => {
                let mut state = self.state.write().await;
                if state.session.as_ref().is_some_and(|s| s.chain_id() != handles.chain_id()) {
                    debug!("Session was bound to another chain, dropping it");
                    state.session = None;
                }
                state.handles = Some(handles.clone());
                drop(state);

                self.presenter.set_links(&handles.links);
                Some(handles)
            }
            Err(e) => {
                warn!("Network switch to {} failed: {}", network, e);
                self.presenter.alert(&format!(
                    "{}: {}",
                    self.text(Text::NetworkSwitchFailed),
                    e.friendly(self.locale)
                ));
                None
            }
        }
    }

    // Store the session and flip the UI to connected, role not yet known
    async fn establish_session(&self, wallet: Address, handles: &Handles) {
        let mut state = self.state.write().await;
        state.session = Some(Session::new(wallet, handles.chain_id()));
        drop(state);

        info!("Connected wallet {} on {}", wallet, handles.network);
        self.presenter.set_text(Field::WalletAddress, &wallet.to_checksum());
        self.presenter.set_text(Field::ConnectButton, self.text(Text::RefreshWallet));
        self.apply_controls().await;
    }

    // Also bound to the "refresh wallet" control once connected
    pub async fn connect(&self) -> bool {
        if !self.manager.has_provider() {
            self.alert_error(&AdminError::ProviderMissing);
            return false;
        }

        let Some(handles) = self.switch_to_target_network().await else {
            return false;
        };

        let wallet = match self.manager.request_account(&handles).await {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!("Wallet connection failed: {}", e);
                self.alert_error(&e);
                return false;
            }
        };

        self.establish_session(wallet, &handles).await;
        self.refresh_all().await;
        true
    }

    pub async fn disconnect(&self) {
        let mut state = self.state.write().await;
        let previous = state.session.take();
        state.snapshot = None;
        drop(state);

        if let Some(session) = previous {
            info!("Disconnected wallet {}", session.wallet_address());
        }

        for field in [Field::WalletAddress, Field::NativeBalance, Field::TokenBalance, Field::WalletRole] {
            self.presenter.set_text(field, EMPTY_FIELD);
        }
        self.presenter.set_text(Field::ConnectButton, self.text(Text::ConnectWallet));
        self.apply_controls().await;
    }

    // False when the network could not be selected or the contract does not answer on it.
    // A declined reconnection still counts as a selected network.
    pub async fn on_network_selection_changed(&self, chain_id: u64) -> bool {
        let network = match self.manager.resolve(chain_id) {
            Ok(network) => network,
            Err(e) => {
                self.alert_error(&e);
                return false;
            }
        };

        self.state.write().await.network = network;
        let Some(handles) = self.switch_to_target_network().await else {
            return false;
        };

        if !self.is_connected().await {
            match self.manager.request_account(&handles).await {
                Ok(wallet) => self.establish_session(wallet, &handles).await,
                Err(e) if e.is_user_rejected() => {
                    debug!("Reconnection declined by the user");
                    return true;
                }
                Err(e) => {
                    warn!("Reconnection after network change failed: {}", e);
                    return true;
                }
            }
        }

        self.refresh_all().await;
        self.probe_contract().await
    }

    // Wallet reads then contract snapshot; no-op while disconnected
    pub async fn refresh_all(&self) {
        let Some((session, handles)) = self.connected_quiet().await else {
            return;
        };

        let reader = StateReader::new(&handles.contract);
        let readout = reader.read_wallet(session.wallet_address()).await;

        match readout.native_balance {
            Ok(balance) => self.presenter.set_text(Field::NativeBalance, &format_native_balance(balance)),
            Err(_) => self.presenter.set_text(Field::NativeBalance, self.text(Text::NativeBalanceFailed)),
        }

        match readout.token_balance {
            Ok(balance) => self.presenter.set_text(Field::TokenBalance, &format_token_balance(balance)),
            Err(_) => self.presenter.set_text(Field::TokenBalance, self.text(Text::TokenBalanceFailed)),
        }

        self.apply_role(session.wallet_address(), readout.is_owner).await;
        self.load_contract_snapshot().await;
    }

    async fn apply_role(&self, wallet: &Address, result: Result<bool, AdminError>) {
        let mut state = self.state.write().await;
        // The session may have changed while reading
        let Some(session) = state.session.as_mut().filter(|s| s.wallet_address() == wallet) else {
            return;
        };

        let label = match result {
            Ok(true) => {
                session.set_owner(wallet);
                Text::RoleOwner
            }
            Ok(false) => {
                session.revoke_owner();
                Text::RoleUser
            }
            Err(_) => {
                session.revoke_owner();
                Text::RoleCheckFailed
            }
        };
        drop(state);

        self.presenter.set_text(Field::WalletRole, self.text(label));
        self.apply_controls().await;
    }

    // Fields are only written when every read succeeded
    pub async fn load_contract_snapshot(&self) {
        let Some((_, handles)) = self.connected_quiet().await else {
            return;
        };

        match StateReader::new(&handles.contract).load_contract_snapshot().await {
            Ok(snapshot) => {
                self.presenter.set_text(Field::Name, &snapshot.name);
                self.presenter.set_text(Field::Symbol, &snapshot.symbol);
                self.presenter.set_text(Field::Decimals, &snapshot.decimals.to_string());
                self.presenter.set_text(Field::TotalSupply, &snapshot.total_supply_display());
                self.presenter.set_text(Field::Paused, snapshot.paused_display(self.locale));
                self.presenter.set_text(Field::Owner, &snapshot.owner.to_checksum());
                self.state.write().await.snapshot = Some(snapshot);
            }
            Err(e) => {
                warn!("Error while loading contract state: {}", e);
                if e.is_network_mismatch() {
                    self.presenter.alert(&i18n::contract_not_found(
                        self.locale,
                        &handles.network.to_string(),
                        &self.manager.contract_address().to_checksum(),
                    ));
                } else {
                    self.alert_error(&e);
                }
            }
        }
    }

    // True when the contract answers, or when there is nothing to probe yet
    pub async fn probe_contract(&self) -> bool {
        let Some((_, handles)) = self.connected_quiet().await else {
            return true;
        };

        match StateReader::new(&handles.contract).probe().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Contract probe failed: {}", e);
                let network = handles.network.to_string();
                let message = if e.is_network_mismatch() {
                    i18n::contract_not_found(self.locale, &network, &self.manager.contract_address().to_checksum())
                } else {
                    i18n::contract_connection_failed(self.locale, &network, &e.friendly(self.locale))
                };
                self.presenter.alert(&message);
                false
            }
        }
    }

    // Connected session, owner gate, validation, submission, then a full refresh
    pub async fn run_action(&self, input: ActionInput) -> bool {
        let action = input.action();
        let Some((session, handles)) = self.connected().await else {
            return false;
        };

        if action.is_owner_only() && !session.is_owner() {
            self.alert_error(&AdminError::OwnerRequired);
            return false;
        }

        match self
            .dispatcher
            .dispatch(&handles.contract, session.wallet_address(), &input)
            .await
        {
            Ok((validated, _)) => {
                self.presenter.alert(&validated.confirmation(self.locale));
                self.refresh_all().await;
                true
            }
            Err(e) => {
                self.alert_error(&e);
                false
            }
        }
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.dispatcher.is_pending(action)
    }

    pub async fn pause(&self) -> bool {
        self.run_action(ActionInput::Pause).await
    }

    pub async fn unpause(&self) -> bool {
        self.run_action(ActionInput::Unpause).await
    }

    pub async fn set_lockup(&self, account: &str, minutes: &str, amount: &str) -> bool {
        self.run_action(ActionInput::SetLockup {
            account: account.to_owned(),
            minutes: minutes.to_owned(),
            amount: amount.to_owned(),
        })
        .await
    }

    pub async fn extend_lockup(&self, account: &str, minutes: &str) -> bool {
        self.run_action(ActionInput::ExtendLockup {
            account: account.to_owned(),
            minutes: minutes.to_owned(),
        })
        .await
    }

    pub async fn decrease_lock_amount(&self, account: &str, amount: &str) -> bool {
        self.run_action(ActionInput::DecreaseLockAmount {
            account: account.to_owned(),
            amount: amount.to_owned(),
        })
        .await
    }

    pub async fn release_lockup(&self, account: &str, amount: &str) -> bool {
        self.run_action(ActionInput::ReleaseLockup {
            account: account.to_owned(),
            amount: amount.to_owned(),
        })
        .await
    }

    pub async fn clear_expired_lockup(&self, account: &str) -> bool {
        self.run_action(ActionInput::ClearExpiredLockup {
            account: account.to_owned(),
        })
        .await
    }

    pub async fn transfer(&self, to: &str, amount: &str) -> bool {
        self.run_action(ActionInput::Transfer {
            to: to.to_owned(),
            amount: amount.to_owned(),
        })
        .await
    }

    pub async fn burn(&self, amount: &str) -> bool {
        self.run_action(ActionInput::Burn {
            amount: amount.to_owned(),
        })
        .await
    }

    fn show_query_failure(&self, area: ResultArea, error: &AdminError) {
        self.presenter.show_result(
            area,
            &format!("{}: {}", self.text(Text::QueryFailed), error.friendly(self.locale)),
            Status::Failure,
        );
    }

    // Handles and validated address of a query, or the failure shown in its result box
    async fn query_target(&self, area: ResultArea, input: &str) -> Option<(Handles, Address)> {
        let (_, handles) = self.connected().await?;
        match validate_address(input) {
            Ok(account) => Some((handles, account)),
            Err(e) => {
                self.show_query_failure(area, &AdminError::from(e));
                None
            }
        }
    }

    pub async fn check_lockup(&self, account: &str) -> bool {
        let area = ResultArea::LockupInfo;
        let Some((handles, account)) = self.query_target(area, account).await else {
            return false;
        };

        match StateReader::new(&handles.contract).lookup_lockup(&account).await {
            Ok(record) => {
                let view = LockupView::new(&record, now_formatted());
                let status = if view.is_active() { Status::Success } else { Status::Neutral };
                self.presenter.show_result(area, &view.render(self.locale), status);
                true
            }
            Err(e) => {
                self.show_query_failure(area, &e);
                false
            }
        }
    }

    pub async fn check_unlocked_balance(&self, account: &str) -> bool {
        let area = ResultArea::UnlockedBalance;
        let Some((handles, account)) = self.query_target(area, account).await else {
            return false;
        };

        match StateReader::new(&handles.contract).lookup_unlocked_balance(&account).await {
            Ok(breakdown) => {
                self.presenter.show_result(area, &breakdown.render(self.locale), Status::Success);
                true
            }
            Err(e) => {
                self.show_query_failure(area, &e);
                false
            }
        }
    }

    pub async fn check_balance(&self, account: &str) -> bool {
        let area = ResultArea::Balance;
        let Some((handles, account)) = self.query_target(area, account).await else {
            return false;
        };

        match StateReader::new(&handles.contract).balance_of(&account).await {
            Ok(balance) => {
                self.presenter.show_result(area, &render_total_balance(balance, self.locale), Status::Success);
                true
            }
            Err(e) => {
                self.show_query_failure(area, &e);
                false
            }
        }
    }
}
