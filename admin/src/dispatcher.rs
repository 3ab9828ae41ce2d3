use crate::{contract, contract::TokenContract, error::AdminError, ui::Control};
use gpmf_common::{
    abi::{ContractCall, Token},
    address::Address,
    config::TOKEN_SYMBOL,
    i18n::Locale,
    rpc::TransactionReceipt,
    validation::{validate_address, validate_amount, validate_minutes, AmountBounds, TokenAmount, ValidationError},
};
use log::{debug, error, info};
use primitive_types::U256;
use serde::Serialize;
use std::{collections::HashSet, sync::Mutex};
use strum::{Display, EnumIter, EnumString};

// Privileged state changing operations on the token contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Pause,
    Unpause,
    SetLockup,
    ExtendLockup,
    DecreaseLockAmount,
    ReleaseLockup,
    ClearExpiredLockup,
    Transfer,
    Burn,
}

impl Action {
    pub fn control(&self) -> Control {
        match self {
            Action::Pause => Control::Pause,
            Action::Unpause => Control::Unpause,
            Action::SetLockup => Control::SetLockup,
            Action::ExtendLockup => Control::ExtendLockup,
            Action::DecreaseLockAmount => Control::DecreaseLockAmount,
            Action::ReleaseLockup => Control::ReleaseLockup,
            Action::ClearExpiredLockup => Control::ClearExpiredLockup,
            Action::Transfer => Control::Transfer,
            Action::Burn => Control::Burn,
        }
    }

    pub fn is_owner_only(&self) -> bool {
        self.control().is_owner_only()
    }
}

// Form values exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionInput {
    Pause,
    Unpause,
    SetLockup { account: String, minutes: String, amount: String },
    ExtendLockup { account: String, minutes: String },
    DecreaseLockAmount { account: String, amount: String },
    ReleaseLockup { account: String, amount: String },
    ClearExpiredLockup { account: String },
    Transfer { to: String, amount: String },
    Burn { amount: String },
}

impl ActionInput {
    pub fn action(&self) -> Action {
        match self {
            ActionInput::Pause => Action::Pause,
            ActionInput::Unpause => Action::Unpause,
            ActionInput::SetLockup { .. } => Action::SetLockup,
            ActionInput::ExtendLockup { .. } => Action::ExtendLockup,
            ActionInput::DecreaseLockAmount { .. } => Action::DecreaseLockAmount,
            ActionInput::ReleaseLockup { .. } => Action::ReleaseLockup,
            ActionInput::ClearExpiredLockup { .. } => Action::ClearExpiredLockup,
            ActionInput::Transfer { .. } => Action::Transfer,
            ActionInput::Burn { .. } => Action::Burn,
        }
    }

    // Checks run in field order: address, then duration, then amount
    pub fn validate(&self, bounds: &AmountBounds) -> Result<ValidatedAction, ValidationError> {
        Ok(match self {
            ActionInput::Pause => ValidatedAction::Pause,
            ActionInput::Unpause => ValidatedAction::Unpause,
            ActionInput::SetLockup { account, minutes, amount } => ValidatedAction::SetLockup {
                account: validate_address(account)?,
                minutes: validate_minutes(minutes)?,
                amount: validate_amount(amount, bounds)?,
            },
            ActionInput::ExtendLockup { account, minutes } => ValidatedAction::ExtendLockup {
                account: validate_address(account)?,
                minutes: validate_minutes(minutes)?,
            },
            ActionInput::DecreaseLockAmount { account, amount } => ValidatedAction::DecreaseLockAmount {
                account: validate_address(account)?,
                amount: validate_amount(amount, bounds)?,
            },
            ActionInput::ReleaseLockup { account, amount } => ValidatedAction::ReleaseLockup {
                account: validate_address(account)?,
                amount: validate_amount(amount, bounds)?,
            },
            ActionInput::ClearExpiredLockup { account } => ValidatedAction::ClearExpiredLockup {
                account: validate_address(account)?,
            },
            ActionInput::Transfer { to, amount } => ValidatedAction::Transfer {
                to: validate_address(to)?,
                amount: validate_amount(amount, bounds)?,
            },
            ActionInput::Burn { amount } => ValidatedAction::Burn {
                amount: validate_amount(amount, bounds)?,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Pause,
    Unpause,
    SetLockup { account: Address, minutes: u64, amount: TokenAmount },
    ExtendLockup { account: Address, minutes: u64 },
    DecreaseLockAmount { account: Address, amount: TokenAmount },
    ReleaseLockup { account: Address, amount: TokenAmount },
    ClearExpiredLockup { account: Address },
    Transfer { to: Address, amount: TokenAmount },
    Burn { amount: TokenAmount },
}

impl ValidatedAction {
    pub fn action(&self) -> Action {
        match self {
            ValidatedAction::Pause => Action::Pause,
            ValidatedAction::Unpause => Action::Unpause,
            ValidatedAction::SetLockup { .. } => Action::SetLockup,
            ValidatedAction::ExtendLockup { .. } => Action::ExtendLockup,
            ValidatedAction::DecreaseLockAmount { .. } => Action::DecreaseLockAmount,
            ValidatedAction::ReleaseLockup { .. } => Action::ReleaseLockup,
            ValidatedAction::ClearExpiredLockup { .. } => Action::ClearExpiredLockup,
            ValidatedAction::Transfer { .. } => Action::Transfer,
            ValidatedAction::Burn { .. } => Action::Burn,
        }
    }

    pub fn call(&self) -> ContractCall {
        match self {
            ValidatedAction::Pause => ContractCall::new(contract::PAUSE, Vec::new()),
            ValidatedAction::Unpause => ContractCall::new(contract::UNPAUSE, Vec::new()),
            ValidatedAction::SetLockup { account, minutes, amount } => ContractCall::new(
                contract::SET_LOCKUP,
                vec![Token::Address(*account), Token::Uint(U256::from(*minutes)), Token::Uint(amount.base())],
            ),
            ValidatedAction::ExtendLockup { account, minutes } => ContractCall::new(
                contract::EXTEND_LOCKUP,
                vec![Token::Address(*account), Token::Uint(U256::from(*minutes))],
            ),
            ValidatedAction::DecreaseLockAmount { account, amount } => ContractCall::new(
                contract::DECREASE_LOCK_AMOUNT,
                vec![Token::Address(*account), Token::Uint(amount.base())],
            ),
            ValidatedAction::ReleaseLockup { account, amount } => ContractCall::new(
                contract::RELEASE_LOCKUP,
                vec![Token::Address(*account), Token::Uint(amount.base())],
            ),
            ValidatedAction::ClearExpiredLockup { account } => {
                ContractCall::new(contract::CLEAR_EXPIRED_LOCKUP, vec![Token::Address(*account)])
            }
            ValidatedAction::Transfer { to, amount } => ContractCall::new(
                contract::TRANSFER,
                vec![Token::Address(*to), Token::Uint(amount.base())],
            ),
            ValidatedAction::Burn { amount } => ContractCall::new(contract::BURN, vec![Token::Uint(amount.base())]),
        }
    }

    // Success notice, with the caveats the operator must not miss
    pub fn confirmation(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.confirmation_en(),
            Locale::Ko => self.confirmation_ko(),
        }
    }

    fn confirmation_en(&self) -> String {
        match self {
            ValidatedAction::Pause => "Token paused.".to_owned(),
            ValidatedAction::Unpause => "Token unpaused.".to_owned(),
            ValidatedAction::SetLockup { minutes, amount, .. } => format!(
                "Lock-up set: {} {} locked for {} minutes",
                amount.display(), TOKEN_SYMBOL, minutes
            ),
            ValidatedAction::ExtendLockup { minutes, .. } => format!("Lock-up extended: {} minutes added", minutes),
            ValidatedAction::DecreaseLockAmount { amount, .. } => format!(
                "Lock amount decreased\nNew locked amount: {} {}\n\nNote: the lock amount was replaced by this value, it was not subtracted from the previous amount!",
                amount.display(), TOKEN_SYMBOL
            ),
            ValidatedAction::ReleaseLockup { amount, .. } => format!(
                "Lock-up partially released\nReleased amount: {} {}\n\nThe entered amount was subtracted from the existing lock-up.",
                amount.display(), TOKEN_SYMBOL
            ),
            ValidatedAction::ClearExpiredLockup { .. } => "Expired lock-up cleared\n\nThe record was removed from contract storage.\nThis is optional and only saves gas.".to_owned(),
            ValidatedAction::Transfer { to, amount } => format!(
                "Transfer complete\nRecipient: {}\nAmount: {} {}\n\nThe transaction was processed successfully.",
                to, amount.display(), TOKEN_SYMBOL
            ),
            ValidatedAction::Burn { amount } => format!(
                "Burn complete\nBurned amount: {} {}\n\nThese tokens are permanently destroyed and cannot be recovered.\nThe total supply decreased accordingly.",
                amount.display(), TOKEN_SYMBOL
            ),
        }
    }

    fn confirmation_ko(&self) -> String {
        match self {
            ValidatedAction::Pause => "토큰 일시정지 완료".to_owned(),
            ValidatedAction::Unpause => "토큰 정상화 완료".to_owned(),
            ValidatedAction::SetLockup { minutes, amount, .. } => format!(
                "락업 설정 완료: {} {}를 {}분 동안 락업",
                amount.display(), TOKEN_SYMBOL, minutes
            ),
            ValidatedAction::ExtendLockup { minutes, .. } => format!("락업 연장 완료: {}분 추가됨", minutes),
            ValidatedAction::DecreaseLockAmount { amount, .. } => format!(
                "락업 수량 감소 완료\n새로운 락업 수량: {} {}\n\n주의: 기존 수량에서 빼는 것이 아니라 새 수량으로 교체되었습니다!",
                amount.display(), TOKEN_SYMBOL
            ),
            ValidatedAction::ReleaseLockup { amount, .. } => format!(
                "락업 부분 해제 완료\n해제된 수량: {} {}\n\n입력한 수량만큼 기존 락업에서 차감되었습니다!",
                amount.display(), TOKEN_SYMBOL
            ),
            ValidatedAction::ClearExpiredLockup { .. } => "만료된 락업 제거 완료\n\n컨트랙트 저장소에서 깔끔하게 정리되었습니다.\n이 작업은 필수가 아니며 가스비 절약을 위한 선택사항입니다.".to_owned(),
            ValidatedAction::Transfer { to, amount } => format!(
                "전송 완료!\n받는 주소: {}\n전송 수량: {} {}\n\n트랜잭션이 성공적으로 처리되었습니다.",
                to, amount.display(), TOKEN_SYMBOL
            ),
            ValidatedAction::Burn { amount } => format!(
                "소각 완료!\n소각된 수량: {} {}\n\n이 토큰은 영구적으로 제거되었으며 복구할 수 없습니다.\n총 공급량도 함께 감소했습니다.",
                amount.display(), TOKEN_SYMBOL
            ),
        }
    }
}

// Marks an action as pending until dropped
struct InFlight<'a> {
    pending: &'a Mutex<HashSet<Action>>,
    action: Action,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.remove(&self.action);
    }
}

// Validate, estimate, submit and confirm one action at a time per kind
pub struct ActionDispatcher {
    bounds: AmountBounds,
    in_flight_guard: bool,
    pending: Mutex<HashSet<Action>>,
}

impl ActionDispatcher {
    pub fn new(bounds: AmountBounds, in_flight_guard: bool) -> Self {
        Self {
            bounds,
            in_flight_guard,
            pending: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_pending(&self, action: Action) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.contains(&action)
    }

    fn begin(&self, action: Action) -> Result<Option<InFlight<'_>>, AdminError> {
        if !self.in_flight_guard {
            return Ok(None);
        }

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if !pending.insert(action) {
            return Err(AdminError::InFlight(action));
        }

        Ok(Some(InFlight {
            pending: &self.pending,
            action,
        }))
    }

    // Inputs are checked before anything reaches the provider
    pub fn validate(&self, input: &ActionInput) -> Result<ValidatedAction, AdminError> {
        Ok(input.validate(&self.bounds)?)
    }

    pub async fn dispatch(
        &self,
        contract: &TokenContract,
        from: &Address,
        input: &ActionInput,
    ) -> Result<(ValidatedAction, TransactionReceipt), AdminError> {
        let validated = self.validate(input)?;
        let action = validated.action();
        let _guard = self.begin(action)?;

        if log::log_enabled!(log::Level::Debug) {
            debug!("Dispatching {} from {}", action, from);
        }

        match contract.submit(from, &validated.call()).await {
            Ok(receipt) => {
                info!("{} confirmed in {}", action, receipt.transaction_hash);
                Ok((validated, receipt))
            }
            Err(e) => {
                error!("{} failed: {}", action, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpmf_common::abi::to_hex_data;

    const ACCOUNT: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    #[test]
    fn test_validation_rejects() {
        let bounds = AmountBounds::default();
        let input = ActionInput::SetLockup {
            account: "0x1234".to_owned(),
            minutes: "10".to_owned(),
            amount: "5".to_owned(),
        };
        assert!(matches!(input.validate(&bounds), Err(ValidationError::InvalidAddress(_))));

        let input = ActionInput::SetLockup {
            account: ACCOUNT.to_owned(),
            minutes: "0".to_owned(),
            amount: "5".to_owned(),
        };
        assert!(matches!(input.validate(&bounds), Err(ValidationError::InvalidInteger(..))));

        let input = ActionInput::Burn { amount: "1000000001".to_owned() };
        assert!(matches!(input.validate(&bounds), Err(ValidationError::AmountOutOfRange { .. })));

        let input = ActionInput::Transfer { to: ACCOUNT.to_owned(), amount: String::new() };
        assert!(matches!(input.validate(&bounds), Err(ValidationError::InvalidAmount(..))));
    }

    #[test]
    fn test_call_encoding() {
        let input = ActionInput::Transfer { to: ACCOUNT.to_owned(), amount: "1.5".to_owned() };
        let validated = input.validate(&AmountBounds::default()).unwrap();
        let data = to_hex_data(&validated.call().data());
        assert!(data.starts_with("0xa9059cbb"));
        assert!(data.contains("52908400098527886e0f7030069857d2e4169ee7"));
        // 1.5 * 10^18
        assert!(data.ends_with("14d1120d7b160000"));

        let validated = ActionInput::Pause.validate(&AmountBounds::default()).unwrap();
        assert_eq!(to_hex_data(&validated.call().data()), "0x8456cb59");
    }

    #[test]
    fn test_confirmation_caveats() {
        let bounds = AmountBounds::default();
        let decrease = ActionInput::DecreaseLockAmount { account: ACCOUNT.to_owned(), amount: "10".to_owned() }
            .validate(&bounds)
            .unwrap();
        assert!(decrease.confirmation(Locale::En).contains("replaced"));

        let release = ActionInput::ReleaseLockup { account: ACCOUNT.to_owned(), amount: "10".to_owned() }
            .validate(&bounds)
            .unwrap();
        assert!(release.confirmation(Locale::En).contains("subtracted from the existing lock-up"));
        assert!(release.confirmation(Locale::Ko).contains("차감"));
    }

    #[test]
    fn test_in_flight_guard() {
        let dispatcher = ActionDispatcher::new(AmountBounds::default(), true);
        let guard = dispatcher.begin(Action::Pause).unwrap();
        assert!(guard.is_some());
        assert!(dispatcher.is_pending(Action::Pause));
        assert!(matches!(dispatcher.begin(Action::Pause), Err(AdminError::InFlight(Action::Pause))));
        // other actions are independent
        assert!(dispatcher.begin(Action::Unpause).is_ok());
        drop(guard);
        assert!(!dispatcher.is_pending(Action::Pause));

        let unguarded = ActionDispatcher::new(AmountBounds::default(), false);
        let _first = unguarded.begin(Action::Burn).unwrap();
        assert!(unguarded.begin(Action::Burn).unwrap().is_none());
    }

    #[test]
    fn test_owner_only_actions() {
        assert!(Action::SetLockup.is_owner_only());
        assert!(Action::Pause.is_owner_only());
        assert!(!Action::Transfer.is_owner_only());
        assert!(!Action::Burn.is_owner_only());
    }
}
