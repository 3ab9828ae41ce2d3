#![allow(dead_code)]

use async_trait::async_trait;
use gpmf_admin::{
    contract,
    dispatcher::ActionDispatcher,
    network::NetworkManager,
    panel::AdminPanel,
    provider::{Eip1193Provider, SharedProvider},
    ui::{ControlState, Field, Presenter, ResultArea, Status},
};
use gpmf_common::{
    abi::{decode_address, encode_tokens, from_hex_data, selector, to_hex_data, to_quantity, Token},
    address::Address,
    chain::{parse_chain_id, ExplorerLinks},
    i18n::Locale,
    rpc::*,
    validation::AmountBounds,
};
use primitive_types::U256;
use serde_json::{json, Value};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

pub const CONTRACT: &str = "0x5aeed5b7e5ac5e8a9b8d4f8a3d2f1f0e4c6b7a81";
pub const OWNER: &str = "0x1111111111111111111111111111111111111111";
pub const HOLDER: &str = "0x2222222222222222222222222222222222222222";

const TX_HASH: &str = "0x00000000000000000000000000000000000000000000000000000000000000aa";

const READS: &[&str] = &[
    contract::NAME,
    contract::SYMBOL,
    contract::DECIMALS,
    contract::TOTAL_SUPPLY,
    contract::PAUSED,
    contract::OWNER,
    contract::BALANCE_OF,
    contract::LOCKED_INFO,
    contract::UNLOCKED_BALANCE_OF,
    contract::LOCKED_BALANCE,
];

pub fn address(value: &str) -> Address {
    value.parse().unwrap()
}

pub fn tokens(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(18)
}

// Chain and contract as seen through the wallet
pub struct ChainState {
    pub chain_id: u64,
    pub known_chains: HashSet<u64>,
    pub accounts: Vec<Address>,
    pub native_balance: U256,
    pub name: String,
    pub owner: Address,
    pub paused: bool,
    pub total_supply: U256,
    pub balances: HashMap<Address, U256>,
    // locked, remaining seconds, expiration
    pub lockups: HashMap<Address, (U256, u64, u64)>,
    pub has_code: bool,
    pub gas_estimate: U256,
    pub receipt_status: &'static str,
    pub pending_polls: usize,
    pub method_failures: HashMap<&'static str, ProviderError>,
    pub call_failures: HashMap<&'static str, ProviderError>,
}

impl Default for ChainState {
    fn default() -> Self {
        let mut balances = HashMap::new();
        balances.insert(address(OWNER), tokens(1_000));
        balances.insert(address(HOLDER), tokens(100));

        Self {
            chain_id: 56,
            known_chains: HashSet::from([56]),
            accounts: vec![address(OWNER)],
            native_balance: tokens(2),
            name: "GPMF Token".to_owned(),
            owner: address(OWNER),
            paused: false,
            total_supply: tokens(1_000_000),
            balances,
            lockups: HashMap::new(),
            has_code: true,
            gas_estimate: U256::from(50_000u64),
            receipt_status: "0x1",
            pending_polls: 0,
            method_failures: HashMap::new(),
            call_failures: HashMap::new(),
        }
    }
}

impl ChainState {
    fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn lockup(&self, account: &Address) -> (U256, u64, u64) {
        self.lockups.get(account).copied().unwrap_or_default()
    }

    fn call(&self, tx: &Value) -> Result<Value, ProviderError> {
        if !self.has_code {
            return Ok(json!("0x"));
        }

        let data = from_hex_data(tx["data"].as_str().unwrap_or_default()).unwrap();
        let (sel, args) = data.split_at(4);
        let signature = READS
            .iter()
            .copied()
            .find(|signature| selector(signature).as_slice() == sel)
            .ok_or_else(|| ProviderError::message("execution reverted"))?;

        if let Some(e) = self.call_failures.get(signature) {
            return Err(e.clone());
        }

        let account = || decode_address(args, 0).unwrap();
        let result = match signature {
            contract::NAME => vec![Token::String(self.name.clone())],
            contract::SYMBOL => vec![Token::String("GPMF".to_owned())],
            contract::DECIMALS => vec![Token::Uint(U256::from(18u64))],
            contract::TOTAL_SUPPLY => vec![Token::Uint(self.total_supply)],
            contract::PAUSED => vec![Token::Bool(self.paused)],
            contract::OWNER => vec![Token::Address(self.owner)],
            contract::BALANCE_OF => vec![Token::Uint(self.balance(&account()))],
            contract::LOCKED_INFO => {
                let (locked, remaining, expiration) = self.lockup(&account());
                vec![
                    Token::Uint(locked),
                    Token::Uint(U256::from(remaining)),
                    Token::Uint(U256::from(expiration)),
                ]
            }
            contract::UNLOCKED_BALANCE_OF => {
                let account = account();
                let (locked, remaining, _) = self.lockup(&account);
                let locked = if remaining > 0 { locked } else { U256::zero() };
                vec![Token::Uint(self.balance(&account).saturating_sub(locked))]
            }
            _ => vec![Token::Uint(self.lockup(&account()).0)],
        };

        Ok(json!(to_hex_data(&encode_tokens(&result))))
    }

    fn apply(&mut self, tx: &Value) {
        let data = from_hex_data(tx["data"].as_str().unwrap_or_default()).unwrap();
        if data.starts_with(&selector(contract::PAUSE)) {
            self.paused = true;
        } else if data.starts_with(&selector(contract::UNPAUSE)) {
            self.paused = false;
        }
    }
}

// In-memory wallet answering like an injected EIP-1193 provider
#[derive(Default)]
pub struct FakeWallet {
    state: Mutex<ChainState>,
    requests: Mutex<Vec<(String, Value)>>,
    pending_tx: Mutex<Option<Value>>,
}

impl FakeWallet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(method, _)| method.clone()).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|(m, _)| m == method).count()
    }

    pub fn sent_transactions(&self) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == ETH_SEND_TRANSACTION)
            .map(|(_, params)| params[0].clone())
            .collect()
    }

    // eth_call requests targeting the given contract function
    pub fn calls_to(&self, signature: &str) -> usize {
        let expected = selector(signature);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == ETH_CALL)
            .filter_map(|(_, params)| params[0]["data"].as_str().and_then(|data| from_hex_data(data).ok()))
            .filter(|data| data.starts_with(&expected))
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

fn requested_chain_id(params: &Value) -> u64 {
    params[0]["chainId"].as_str().and_then(parse_chain_id).unwrap()
}

#[async_trait]
impl Eip1193Provider for FakeWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.requests.lock().unwrap().push((method.to_owned(), params.clone()));

        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.method_failures.get(method) {
            return Err(e.clone());
        }

        match method {
            ETH_CHAIN_ID => Ok(json!(format!("0x{:x}", state.chain_id))),
            WALLET_SWITCH_ETHEREUM_CHAIN => {
                let chain_id = requested_chain_id(&params);
                if !state.known_chains.contains(&chain_id) {
                    return Err(ProviderError::new(UNRECOGNIZED_CHAIN, "Unrecognized chain ID"));
                }
                state.chain_id = chain_id;
                Ok(Value::Null)
            }
            WALLET_ADD_ETHEREUM_CHAIN => {
                state.known_chains.insert(requested_chain_id(&params));
                Ok(Value::Null)
            }
            ETH_REQUEST_ACCOUNTS | ETH_ACCOUNTS => Ok(json!(state.accounts)),
            ETH_GET_BALANCE => Ok(json!(to_quantity(state.native_balance))),
            ETH_CALL => state.call(&params[0]),
            ETH_ESTIMATE_GAS => Ok(json!(to_quantity(state.gas_estimate))),
            ETH_SEND_TRANSACTION => {
                *self.pending_tx.lock().unwrap() = Some(params[0].clone());
                Ok(json!(TX_HASH))
            }
            ETH_GET_TRANSACTION_RECEIPT => {
                if state.pending_polls > 0 {
                    state.pending_polls -= 1;
                    return Ok(Value::Null);
                }

                let mined = self.pending_tx.lock().unwrap().take();
                let success = state.receipt_status == "0x1";
                if let (Some(tx), true) = (mined, success) {
                    state.apply(&tx);
                }
                Ok(json!({
                    "transactionHash": TX_HASH,
                    "blockNumber": "0x1",
                    "gasUsed": "0x5208",
                    "status": state.receipt_status,
                }))
            }
            _ => Err(ProviderError::new(METHOD_NOT_FOUND, "Method not found")),
        }
    }
}

// Presenter keeping everything it was asked to show
#[derive(Default)]
pub struct RecordingPresenter {
    fields: Mutex<HashMap<Field, String>>,
    results: Mutex<Vec<(ResultArea, String, Status)>>,
    alerts: Mutex<Vec<String>>,
    links: Mutex<Option<ExplorerLinks>>,
    controls: Mutex<Vec<ControlState>>,
}

impl RecordingPresenter {
    pub fn field(&self, field: Field) -> Option<String> {
        self.fields.lock().unwrap().get(&field).cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.lock().unwrap().last().cloned()
    }

    pub fn last_result(&self) -> Option<(ResultArea, String, Status)> {
        self.results.lock().unwrap().last().cloned()
    }

    pub fn links(&self) -> Option<ExplorerLinks> {
        self.links.lock().unwrap().clone()
    }

    pub fn last_controls(&self) -> Option<ControlState> {
        self.controls.lock().unwrap().last().copied()
    }
}

impl Presenter for RecordingPresenter {
    fn set_text(&self, field: Field, text: &str) {
        self.fields.lock().unwrap().insert(field, text.to_owned());
    }

    fn show_result(&self, area: ResultArea, text: &str, status: Status) {
        self.results.lock().unwrap().push((area, text.to_owned(), status));
    }

    fn set_links(&self, links: &ExplorerLinks) {
        *self.links.lock().unwrap() = Some(links.clone());
    }

    fn apply_controls(&self, state: &ControlState) {
        self.controls.lock().unwrap().push(*state);
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_owned());
    }
}

pub fn panel_with(provider: Option<SharedProvider>, presenter: Arc<RecordingPresenter>) -> AdminPanel {
    let manager = NetworkManager::new(provider, address(CONTRACT), Duration::from_millis(5));
    let dispatcher = ActionDispatcher::new(AmountBounds::default(), true);
    AdminPanel::new(manager, dispatcher, presenter, Locale::En)
}

pub fn setup() -> (Arc<FakeWallet>, Arc<RecordingPresenter>, AdminPanel) {
    let wallet = FakeWallet::new();
    let presenter = Arc::new(RecordingPresenter::default());
    let panel = panel_with(Some(wallet.clone() as SharedProvider), presenter.clone());
    (wallet, presenter, panel)
}
