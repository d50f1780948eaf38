//! Commands read from the batch input and applied to a [`Bank`].
use std::io;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, de};
use tracing::warn;

use crate::bank::{
    AccountTerms, Bank, Customer, LedgerError,
    types::{AccountNumber, CustomerId, Money, Rate, to_fixed, to_rate},
};

/// Enum representing the operation a command performs.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    AddCustomer,
    RemoveCustomer,
    Open,
    Deposit,
    Withdraw,
    Transfer,
    Interest,
    SetRate,
    SetLimit,
}

/// Custom deserializer for monetary values to handle fixed-point representation.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    value
        .map(to_fixed)
        .transpose()
        .map_err(de::Error::custom)
}

/// Custom deserializer for rates, which use a finer fixed-point scale than money.
fn deserialize_rate<'de, D>(deserializer: D) -> Result<Option<Rate>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    value.map(to_rate).transpose().map_err(de::Error::custom)
}

/// One row of the batch input. Only the fields its operation needs are read.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Command {
    op: CommandType,

    #[serde(default)]
    customer: Option<CustomerId>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    address: Option<String>,

    /// Account type for `open`, kept as text so unknown types reach the ledger.
    #[serde(rename = "type", default)]
    account_type: Option<String>,

    /// The account operated on; the source account of a transfer.
    #[serde(default)]
    account: Option<AccountNumber>,

    /// Destination account of a transfer.
    #[serde(default)]
    to: Option<AccountNumber>,

    #[serde(default, deserialize_with = "deserialize_money")]
    amount: Option<Money>,

    #[serde(default, deserialize_with = "deserialize_rate")]
    rate: Option<Rate>,

    #[serde(default, deserialize_with = "deserialize_money")]
    limit: Option<Money>,
}

/// Reads commands from CSV input with a header row, trimming whitespace.
/// Rows that cannot be parsed are logged and skipped.
pub fn read_commands<R: io::Read>(reader: R) -> impl Iterator<Item = Command> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader)
        .into_deserialize::<Command>()
        .filter_map(|row| match row {
            Ok(command) => Some(command),
            Err(err) => {
                warn!(error = %err, "skipping malformed command");
                None
            }
        })
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, LedgerError> {
    value.ok_or(LedgerError::MissingField(field))
}

impl Command {
    /// Gets the operation of the command.
    pub fn op(&self) -> CommandType {
        self.op
    }

    /// Applies the command to the bank.
    /// Returns an error if a needed field is missing or the bank rejects the operation.
    pub fn execute(self, bank: &mut Bank) -> Result<(), LedgerError> {
        match self.op {
            CommandType::AddCustomer => {
                let customer = Customer::new(
                    required(self.customer, "customer")?,
                    required(self.name, "name")?,
                    self.address.unwrap_or_default(),
                );
                bank.add_customer(customer)
            }
            CommandType::RemoveCustomer => {
                let customer_id = required(self.customer, "customer")?;
                bank.remove_customer(&customer_id).map(|_| ())
            }
            CommandType::Open => {
                let customer_id = required(self.customer, "customer")?;
                let account_type = required(self.account_type, "type")?;
                let terms = AccountTerms {
                    interest_rate: self.rate,
                    overdraft_limit: self.limit,
                };
                bank.create_account(
                    &customer_id,
                    &account_type,
                    self.amount.unwrap_or_default(),
                    terms,
                )
                .map(|_| ())
            }
            CommandType::Deposit => bank.deposit(
                &required(self.account, "account")?,
                required(self.amount, "amount")?,
            ),
            CommandType::Withdraw => bank.withdraw(
                &required(self.account, "account")?,
                required(self.amount, "amount")?,
            ),
            CommandType::Transfer => bank.transfer_funds(
                &required(self.account, "account")?,
                &required(self.to, "to")?,
                required(self.amount, "amount")?,
            ),
            CommandType::Interest => {
                bank.apply_all_interest();
                Ok(())
            }
            CommandType::SetRate => {
                let number = required(self.account, "account")?;
                let rate = required(self.rate, "rate")?;
                bank.account_mut(&number)?
                    .savings_mut()
                    .ok_or_else(|| LedgerError::NotSavings(number.clone()))?
                    .set_interest_rate(rate);
                Ok(())
            }
            CommandType::SetLimit => {
                let number = required(self.account, "account")?;
                let limit = required(self.limit, "limit")?;
                bank.account_mut(&number)?
                    .checking_mut()
                    .ok_or_else(|| LedgerError::NotChecking(number.clone()))?
                    .set_overdraft_limit(limit);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
impl Command {
    /// A command with no fields set.
    pub fn new(op: CommandType) -> Self {
        Command {
            op,
            customer: None,
            name: None,
            address: None,
            account_type: None,
            account: None,
            to: None,
            amount: None,
            rate: None,
            limit: None,
        }
    }

    pub fn with_customer(mut self, customer: &str) -> Self {
        self.customer = Some(customer.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn with_account_type(mut self, account_type: &str) -> Self {
        self.account_type = Some(account_type.to_string());
        self
    }

    pub fn with_account(mut self, account: &str) -> Self {
        self.account = Some(account.to_string());
        self
    }

    pub fn with_to(mut self, to: &str) -> Self {
        self.to = Some(to.to_string());
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_limit(mut self, limit: Money) -> Self {
        self.limit = Some(limit);
        self
    }
}
