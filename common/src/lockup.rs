// Lock-up records as returned by `lockedInfo(address)` and their rendering.

use crate::{
    config::{TOKEN_DECIMALS, TOKEN_SYMBOL},
    i18n::{Locale, Text},
    time::{format_timestamp, group_thousands, TimestampSeconds},
    units::format_units,
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockupRecord {
    pub locked: U256,
    pub remaining_seconds: u64,
    pub expiration: TimestampSeconds,
}

impl LockupRecord {
    // A record with nothing locked or no time left is not a lock-up
    pub fn is_active(&self) -> bool {
        !self.locked.is_zero() && self.remaining_seconds > 0
    }

    pub fn remaining(&self) -> RemainingTime {
        RemainingTime::from_seconds(self.remaining_seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    // Zero days/hours/minutes are skipped, seconds are always shown
    pub fn format(&self, locale: Locale) -> String {
        let (day, hour, minute, second) = match locale {
            Locale::En => ("d", "h", "m", "s"),
            Locale::Ko => ("일", "시간", "분", "초"),
        };

        let mut parts = Vec::with_capacity(4);
        if self.days > 0 {
            parts.push(format!("{}{}", self.days, day));
        }
        if self.hours > 0 {
            parts.push(format!("{}{}", self.hours, hour));
        }
        if self.minutes > 0 {
            parts.push(format!("{}{}", self.minutes, minute));
        }
        parts.push(format!("{}{}", self.seconds, second));
        parts.join(" ")
    }
}

impl Display for RemainingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(Locale::En))
    }
}

// What `check_lockup` shows for an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockupView {
    Inactive,
    Active {
        locked: String,
        remaining: RemainingTime,
        total_seconds: u64,
        expiration: String,
        now: String,
    },
}

impl LockupView {
    // `now` is the already formatted local time, so rendering stays deterministic
    pub fn new(record: &LockupRecord, now: String) -> Self {
        if !record.is_active() {
            return LockupView::Inactive;
        }

        LockupView::Active {
            locked: format_units(record.locked, TOKEN_DECIMALS),
            remaining: record.remaining(),
            total_seconds: record.remaining_seconds,
            expiration: format_timestamp(record.expiration),
            now,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LockupView::Active { .. })
    }

    pub fn render(&self, locale: Locale) -> String {
        match self {
            LockupView::Inactive => Text::NoActiveLockup.get(locale).to_owned(),
            LockupView::Active {
                locked,
                remaining,
                total_seconds,
                expiration,
                now,
            } => match locale {
                Locale::En => format!(
                    "Lock-up info\n\nLocked amount: {} {}\nTime remaining: {} ({} seconds total)\nExpires at: {}\nCurrent time: {}",
                    locked,
                    TOKEN_SYMBOL,
                    remaining.format(locale),
                    group_thousands(*total_seconds),
                    expiration,
                    now
                ),
                Locale::Ko => format!(
                    "락업 정보\n\n락업 수량: {} {}\n남은 시간: {} (총 {}초)\n만료 일시: {}\n현재 시간: {}",
                    locked,
                    TOKEN_SYMBOL,
                    remaining.format(locale),
                    group_thousands(*total_seconds),
                    expiration,
                    now
                ),
            },
        }
    }
}

// Total, locked and spendable balance of one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    pub total: U256,
    pub locked: U256,
    pub unlocked: U256,
}

impl BalanceBreakdown {
    pub fn render(&self, locale: Locale) -> String {
        let total = format_units(self.total, TOKEN_DECIMALS);
        let locked = format_units(self.locked, TOKEN_DECIMALS);
        let unlocked = format_units(self.unlocked, TOKEN_DECIMALS);
        match locale {
            Locale::En => format!(
                "Balance info\n\nTotal held: {total} {sym}\nLocked: {locked} {sym}\nAvailable: {unlocked} {sym}",
                sym = TOKEN_SYMBOL
            ),
            Locale::Ko => format!(
                "잔액 정보\n\n전체 보유: {total} {sym}\n락업 중: {locked} {sym}\n사용 가능: {unlocked} {sym}",
                sym = TOKEN_SYMBOL
            ),
        }
    }
}

// Plain balance lookup, with a pointer to the unlocked balance view
pub fn render_total_balance(balance: U256, locale: Locale) -> String {
    let formatted = format_units(balance, TOKEN_DECIMALS);
    match locale {
        Locale::En => format!(
            "Total balance: {} {}\n\nPart of it may be locked.\nUse the unlocked balance check to see the spendable amount.",
            formatted, TOKEN_SYMBOL
        ),
        Locale::Ko => format!(
            "전체 잔액: {} {}\n\n이 중 일부는 락업되어 있을 수 있습니다.\n사용 가능 잔액은 \"사용 가능 잔액 확인\"에서 조회하세요.",
            formatted, TOKEN_SYMBOL
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(amount: u64) -> U256 {
        U256::from(amount) * U256::exp10(18)
    }

    #[test]
    fn test_remaining_breakdown() {
        let remaining = RemainingTime::from_seconds(90_061);
        assert_eq!(
            remaining,
            RemainingTime { days: 1, hours: 1, minutes: 1, seconds: 1 }
        );
        assert_eq!(remaining.format(Locale::En), "1d 1h 1m 1s");
        assert_eq!(remaining.format(Locale::Ko), "1일 1시간 1분 1초");
    }

    #[test]
    fn test_remaining_skips_zero_units() {
        assert_eq!(RemainingTime::from_seconds(86_400).format(Locale::En), "1d 0s");
        assert_eq!(RemainingTime::from_seconds(3_605).format(Locale::En), "1h 5s");
        assert_eq!(RemainingTime::from_seconds(59).format(Locale::En), "59s");
        assert_eq!(RemainingTime::from_seconds(0).format(Locale::En), "0s");
    }

    #[test]
    fn test_inactive_lockup() {
        let empty = LockupRecord { locked: U256::zero(), remaining_seconds: 0, expiration: 0 };
        let view = LockupView::new(&empty, "2024-01-01 00:00:00".to_owned());
        assert_eq!(view, LockupView::Inactive);
        assert_eq!(view.render(Locale::En), "This account has no active lock-up.");
        assert!(!view.render(Locale::En).contains("0d"));

        // expired but not cleared yet
        let expired = LockupRecord { locked: tokens(5), remaining_seconds: 0, expiration: 1_700_000_000 };
        assert!(!LockupView::new(&expired, String::new()).is_active());
    }

    #[test]
    fn test_active_lockup_render() {
        let record = LockupRecord { locked: tokens(1500), remaining_seconds: 172_800, expiration: 1_700_000_000 };
        let view = LockupView::new(&record, "2024-01-01 00:00:00".to_owned());
        assert!(view.is_active());

        let rendered = view.render(Locale::En);
        assert!(rendered.contains("Locked amount: 1500.0 GPMF"), "{}", rendered);
        assert!(rendered.contains("Time remaining: 2d 0s (172,800 seconds total)"), "{}", rendered);
        assert!(rendered.ends_with("Current time: 2024-01-01 00:00:00"));

        let rendered = view.render(Locale::Ko);
        assert!(rendered.contains("남은 시간: 2일 0초 (총 172,800초)"), "{}", rendered);
    }

    #[test]
    fn test_balance_breakdown() {
        let breakdown = BalanceBreakdown { total: tokens(10), locked: tokens(4), unlocked: tokens(6) };
        let rendered = breakdown.render(Locale::En);
        assert!(rendered.contains("Total held: 10.0 GPMF"));
        assert!(rendered.contains("Locked: 4.0 GPMF"));
        assert!(rendered.contains("Available: 6.0 GPMF"));

        assert!(render_total_balance(tokens(3), Locale::En).starts_with("Total balance: 3.0 GPMF"));
    }
}
