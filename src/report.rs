//! CSV reports over the final state of the bank.
use std::io;

use serde::Serialize;

use crate::bank::{Account, Bank, Customer, Money, Rate, rate_to_float, to_float};

fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    to_float(*money).serialize(serializer)
}

fn serialize_optional_rate<S>(rate: &Option<Rate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    rate.map(rate_to_float).serialize(serializer)
}

fn serialize_optional_money<S>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    money.map(to_float).serialize(serializer)
}

/// One row of the accounts report.
#[derive(Serialize)]
struct AccountRecord<'a> {
    account: &'a str,
    customer: &'a str,
    #[serde(rename = "type")]
    account_type: &'static str,
    #[serde(serialize_with = "serialize_money")]
    balance: Money,
    /// Empty for checking accounts.
    #[serde(serialize_with = "serialize_optional_rate")]
    interest_rate: Option<Rate>,
    /// Empty for savings accounts.
    #[serde(serialize_with = "serialize_optional_money")]
    overdraft_limit: Option<Money>,
}

impl<'a> From<&'a Account> for AccountRecord<'a> {
    fn from(account: &'a Account) -> Self {
        AccountRecord {
            account: account.number(),
            customer: account.owner_id(),
            account_type: account.account_type().as_str(),
            balance: account.balance(),
            interest_rate: account.interest_rate(),
            overdraft_limit: account.overdraft_limit(),
        }
    }
}

/// One row of the customers report.
#[derive(Serialize)]
struct CustomerRecord<'a> {
    customer: &'a str,
    name: &'a str,
    address: &'a str,
    accounts: usize,
}

impl<'a> From<&'a Customer> for CustomerRecord<'a> {
    fn from(customer: &'a Customer) -> Self {
        CustomerRecord {
            customer: customer.customer_id(),
            name: customer.name(),
            address: customer.address(),
            accounts: customer.account_numbers().len(),
        }
    }
}

/// Writes every account, ordered by customer ID and then by opening order.
pub fn write_accounts<W: io::Write>(writer: W, bank: &Bank) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for customer in bank.customers() {
        for account in bank.get_customer_accounts(customer.customer_id()) {
            writer.serialize(AccountRecord::from(account))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes every customer, ordered by customer ID.
pub fn write_customers<W: io::Write>(writer: W, bank: &Bank) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for customer in bank.customers() {
        writer.serialize(CustomerRecord::from(customer))?;
    }
    writer.flush()?;
    Ok(())
}
