//! Accounts and the rules that guard their balances.
use std::{fmt, str::FromStr};

use tracing::debug;

use crate::bank::{
    LedgerError,
    types::{AccountNumber, CustomerId, Money, Rate, apply_rate, rate_to_float, to_float},
};

/// Interest rate given to savings accounts opened without one (1%).
pub const DEFAULT_INTEREST_RATE: Rate = 1_000_000;

/// Overdraft limit given to checking accounts opened without one.
pub const DEFAULT_OVERDRAFT_LIMIT: Money = 0;

/// The kinds of account a customer can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    /// Gets the lowercase name used in input and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
        }
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "checking" => Ok(AccountType::Checking),
            _ => Err(LedgerError::UnknownAccountType(s.to_string())),
        }
    }
}

/// Variant-specific terms of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Balance may never go below zero; accrues interest.
    Savings { interest_rate: Rate },
    /// Balance may go down to `-overdraft_limit`.
    Checking { overdraft_limit: Money },
}

/// Optional terms supplied when opening an account. Missing values fall back
/// to [`DEFAULT_INTEREST_RATE`] and [`DEFAULT_OVERDRAFT_LIMIT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountTerms {
    pub interest_rate: Option<Rate>,
    pub overdraft_limit: Option<Money>,
}

/// Represents a bank account owned by a single customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Number minted by the ledger, never reused.
    number: AccountNumber,

    /// The customer holding this account.
    owner_id: CustomerId,

    /// The current balance; negative only for overdrawn checking accounts.
    balance: Money,

    kind: AccountKind,
}

impl Account {
    /// Creates an account of the given type. Negative terms are ignored in
    /// favour of the defaults, the same way the setters ignore them.
    pub fn new(
        number: AccountNumber,
        owner_id: CustomerId,
        account_type: AccountType,
        balance: Money,
        terms: AccountTerms,
    ) -> Self {
        let kind = match account_type {
            AccountType::Savings => AccountKind::Savings {
                interest_rate: DEFAULT_INTEREST_RATE,
            },
            AccountType::Checking => AccountKind::Checking {
                overdraft_limit: DEFAULT_OVERDRAFT_LIMIT,
            },
        };
        let mut account = Account {
            number,
            owner_id,
            balance,
            kind,
        };
        if let (Some(mut savings), Some(rate)) = (account.savings_mut(), terms.interest_rate) {
            savings.set_interest_rate(rate);
        }
        if let (Some(mut checking), Some(limit)) = (account.checking_mut(), terms.overdraft_limit)
        {
            checking.set_overdraft_limit(limit);
        }
        account
    }

    /// Gets the account number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Gets the ID of the customer holding the account.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Gets the current balance.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Gets the type of the account.
    pub fn account_type(&self) -> AccountType {
        match self.kind {
            AccountKind::Savings { .. } => AccountType::Savings,
            AccountKind::Checking { .. } => AccountType::Checking,
        }
    }

    /// Gets the interest rate, if this is a savings account.
    pub fn interest_rate(&self) -> Option<Rate> {
        match self.kind {
            AccountKind::Savings { interest_rate } => Some(interest_rate),
            AccountKind::Checking { .. } => None,
        }
    }

    /// Gets the overdraft limit, if this is a checking account.
    pub fn overdraft_limit(&self) -> Option<Money> {
        match self.kind {
            AccountKind::Checking { overdraft_limit } => Some(overdraft_limit),
            AccountKind::Savings { .. } => None,
        }
    }

    /// Deposits the specified amount into the account.
    /// Returns an error if the amount is not positive or the balance would overflow.
    pub fn deposit(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOutOfRange)?;
        debug!(account = %self.number, amount, balance = self.balance, "deposit");
        Ok(())
    }

    /// Withdraws the specified amount from the account.
    /// Savings accounts may not go below zero, checking accounts may not go below their overdraft limit.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOutOfRange)?;
        match self.kind {
            AccountKind::Savings { .. } if remaining < 0 => {
                return Err(LedgerError::InsufficientFunds);
            }
            AccountKind::Checking { overdraft_limit } if remaining < -overdraft_limit => {
                return Err(LedgerError::OverdraftExceeded);
            }
            _ => {}
        }
        self.balance = remaining;
        debug!(account = %self.number, amount, balance = self.balance, "withdrawal");
        Ok(())
    }

    /// Puts back an amount taken by a successful [`Account::withdraw`].
    pub(crate) fn reverse_withdrawal(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Savings-only operations, or `None` for any other account.
    pub fn savings_mut(&mut self) -> Option<Savings<'_>> {
        match &mut self.kind {
            AccountKind::Savings { interest_rate } => Some(Savings {
                number: &self.number,
                balance: &mut self.balance,
                interest_rate,
            }),
            AccountKind::Checking { .. } => None,
        }
    }

    /// Checking-only operations, or `None` for any other account.
    pub fn checking_mut(&mut self) -> Option<Checking<'_>> {
        match &mut self.kind {
            AccountKind::Checking { overdraft_limit } => Some(Checking {
                number: &self.number,
                overdraft_limit,
            }),
            AccountKind::Savings { .. } => None,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {}: balance {:.2}",
            self.number,
            to_float(self.balance)
        )?;
        match self.kind {
            AccountKind::Savings { interest_rate } => {
                write!(
                    f,
                    ", interest rate {:.2}%",
                    rate_to_float(interest_rate) * 100.0
                )
            }
            AccountKind::Checking { overdraft_limit } => {
                write!(f, ", overdraft limit {:.2}", to_float(overdraft_limit))
            }
        }
    }
}

/// Mutable view over a savings account.
pub struct Savings<'a> {
    number: &'a str,
    balance: &'a mut Money,
    interest_rate: &'a mut Rate,
}

impl Savings<'_> {
    /// Sets the interest rate. A negative rate is ignored and the current one kept.
    pub fn set_interest_rate(&mut self, rate: Rate) {
        if rate < 0 {
            debug!(account = %self.number, rate, "negative interest rate ignored");
            return;
        }
        *self.interest_rate = rate;
    }

    /// Adds one period of interest to the balance. Repeated calls compound.
    /// Returns an error, leaving the balance unchanged, if the result would overflow.
    pub fn apply_interest(&mut self) -> Result<(), LedgerError> {
        let balance = apply_rate(*self.balance, *self.interest_rate)
            .and_then(|interest| self.balance.checked_add(interest))
            .ok_or(LedgerError::AmountOutOfRange)?;
        *self.balance = balance;
        debug!(account = %self.number, balance, "interest applied");
        Ok(())
    }
}

/// Mutable view over a checking account.
pub struct Checking<'a> {
    number: &'a str,
    overdraft_limit: &'a mut Money,
}

impl Checking<'_> {
    /// Sets the overdraft limit. A negative limit is ignored and the current one kept.
    pub fn set_overdraft_limit(&mut self, limit: Money) {
        if limit < 0 {
            debug!(account = %self.number, limit, "negative overdraft limit ignored");
            return;
        }
        *self.overdraft_limit = limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{to_fixed, to_rate};

    fn money(value: f64) -> Money {
        to_fixed(value).unwrap()
    }

    fn rate(value: f64) -> Rate {
        to_rate(value).unwrap()
    }

    fn savings(balance: f64, interest_rate: f64) -> Account {
        Account::new(
            "1000".to_string(),
            "C1".to_string(),
            AccountType::Savings,
            money(balance),
            AccountTerms {
                interest_rate: Some(rate(interest_rate)),
                ..Default::default()
            },
        )
    }

    fn checking(balance: f64, limit: f64) -> Account {
        Account::new(
            "1001".to_string(),
            "C1".to_string(),
            AccountType::Checking,
            money(balance),
            AccountTerms {
                overdraft_limit: Some(money(limit)),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_account_type_from_str() {
        assert_eq!("savings".parse::<AccountType>(), Ok(AccountType::Savings));
        assert_eq!("Checking".parse::<AccountType>(), Ok(AccountType::Checking));
        assert!(matches!(
            "brokerage".parse::<AccountType>(),
            Err(LedgerError::UnknownAccountType(_))
        ));
    }

    #[test]
    fn test_default_terms() {
        let account = Account::new(
            "1000".to_string(),
            "C1".to_string(),
            AccountType::Savings,
            0,
            AccountTerms::default(),
        );
        assert_eq!(account.interest_rate(), Some(rate(0.01)));
        assert_eq!(account.overdraft_limit(), None);

        let account = Account::new(
            "1001".to_string(),
            "C1".to_string(),
            AccountType::Checking,
            0,
            AccountTerms::default(),
        );
        assert_eq!(account.overdraft_limit(), Some(DEFAULT_OVERDRAFT_LIMIT));
    }

    #[test]
    fn test_negative_terms_fall_back_to_defaults() {
        let account = savings(100.0, -0.5);
        assert_eq!(account.interest_rate(), Some(DEFAULT_INTEREST_RATE));
        let account = checking(100.0, -10.0);
        assert_eq!(account.overdraft_limit(), Some(0));
    }

    #[test]
    fn test_deposit() {
        let mut account = savings(0.0, 0.01);
        assert!(account.deposit(money(25.5)).is_ok());
        assert_eq!(account.balance(), money(25.5));
    }

    #[test]
    fn test_deposit_non_positive() {
        let mut account = checking(10.0, 0.0);
        assert_eq!(account.deposit(0), Err(LedgerError::InvalidAmount));
        assert_eq!(account.deposit(money(-5.0)), Err(LedgerError::InvalidAmount));
        assert_eq!(account.balance(), money(10.0));
    }

    #[test]
    fn test_deposit_overflow() {
        let mut account = savings(5e14, 0.01);
        assert_eq!(
            account.deposit(money(5e14)),
            Err(LedgerError::AmountOutOfRange)
        );
        assert_eq!(account.balance(), money(5e14));
        assert!(account.deposit(money(1.0)).is_ok());
    }

    #[test]
    fn test_withdrawal_overflow() {
        let mut account = checking(-5e14, 9e14);
        assert_eq!(
            account.withdraw(money(5e14)),
            Err(LedgerError::AmountOutOfRange)
        );
        assert_eq!(account.balance(), money(-5e14));
    }

    #[test]
    fn test_savings_withdrawal() {
        let mut account = savings(100.0, 0.01);
        assert!(account.withdraw(money(100.0)).is_ok());
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_savings_withdrawal_insufficient_funds() {
        let mut account = savings(100.0, 0.01);
        assert_eq!(
            account.withdraw(money(100.01)),
            Err(LedgerError::InsufficientFunds)
        );
        assert_eq!(account.balance(), money(100.0));
    }

    #[test]
    fn test_withdrawal_non_positive() {
        let mut account = savings(100.0, 0.01);
        assert_eq!(account.withdraw(0), Err(LedgerError::InvalidAmount));
        assert_eq!(account.withdraw(money(-1.0)), Err(LedgerError::InvalidAmount));
        assert_eq!(account.balance(), money(100.0));
    }

    #[test]
    fn test_checking_overdraft() {
        let mut account = checking(0.0, 100.0);
        assert!(account.withdraw(money(50.0)).is_ok());
        assert_eq!(account.balance(), money(-50.0));
        assert_eq!(
            account.withdraw(money(60.0)),
            Err(LedgerError::OverdraftExceeded)
        );
        assert_eq!(account.balance(), money(-50.0));
        assert!(account.withdraw(money(50.0)).is_ok());
        assert_eq!(account.balance(), money(-100.0));
    }

    #[test]
    fn test_apply_interest_compounds() {
        let mut account = savings(1000.0, 0.1);
        let mut view = account.savings_mut().unwrap();
        assert!(view.apply_interest().is_ok());
        assert!(view.apply_interest().is_ok());
        assert_eq!(account.balance(), money(1210.0));
    }

    #[test]
    fn test_apply_interest_fine_rate() {
        let mut account = savings(1000.0, 0.00125);
        assert!(account.savings_mut().unwrap().apply_interest().is_ok());
        assert_eq!(account.balance(), money(1001.25));
    }

    #[test]
    fn test_apply_interest_overflow() {
        let mut account = savings(5e14, 1.0);
        assert_eq!(
            account.savings_mut().unwrap().apply_interest(),
            Err(LedgerError::AmountOutOfRange)
        );
        assert_eq!(account.balance(), money(5e14));
    }

    #[test]
    fn test_interest_is_savings_only() {
        let mut account = checking(100.0, 0.0);
        assert!(account.savings_mut().is_none());
        assert!(account.checking_mut().is_some());
    }

    #[test]
    fn test_setters_ignore_negative_values() {
        let mut account = savings(100.0, 0.02);
        account.savings_mut().unwrap().set_interest_rate(rate(-0.01));
        assert_eq!(account.interest_rate(), Some(rate(0.02)));
        account.savings_mut().unwrap().set_interest_rate(rate(0.03));
        assert_eq!(account.interest_rate(), Some(rate(0.03)));

        let mut account = checking(0.0, 20.0);
        account.checking_mut().unwrap().set_overdraft_limit(money(-5.0));
        assert_eq!(account.overdraft_limit(), Some(money(20.0)));
        account.checking_mut().unwrap().set_overdraft_limit(0);
        assert_eq!(account.overdraft_limit(), Some(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            savings(800.0, 0.05).to_string(),
            "Account 1000: balance 800.00, interest rate 5.00%"
        );
        assert_eq!(
            checking(-50.0, 100.0).to_string(),
            "Account 1001: balance -50.00, overdraft limit 100.00"
        );
    }
}
