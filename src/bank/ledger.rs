//! The `Bank` registry owns every customer and account and routes operations to them.
use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};

use crate::bank::{
    Account, AccountTerms, AccountType, Customer, LedgerError,
    types::{AccountNumber, CustomerId, FIRST_ACCOUNT_NUMBER, Money},
};

/// Registry of all customers and accounts.
pub struct Bank {
    /// Customers by ID, ordered so listings are stable.
    customers: BTreeMap<CustomerId, Customer>,
    /// Accounts by account number.
    accounts: HashMap<AccountNumber, Account>,
    /// The next account number to mint. Only ever increases.
    next_account_number: u64,
}

impl Default for Bank {
    fn default() -> Self {
        Bank::new()
    }
}

impl Bank {
    /// Creates an empty bank whose first account will be numbered 1000.
    pub fn new() -> Self {
        Bank {
            customers: BTreeMap::new(),
            accounts: HashMap::new(),
            next_account_number: FIRST_ACCOUNT_NUMBER,
        }
    }

    /// Registers a customer. Fails if the ID is already taken.
    pub fn add_customer(&mut self, customer: Customer) -> Result<(), LedgerError> {
        if self.customers.contains_key(customer.customer_id()) {
            return Err(LedgerError::DuplicateCustomer(
                customer.customer_id().to_string(),
            ));
        }
        info!(customer = %customer.customer_id(), name = %customer.name(), "customer added");
        self.customers
            .insert(customer.customer_id().to_string(), customer);
        Ok(())
    }

    /// Removes a customer that holds no accounts.
    ///
    /// Accounts are never closed, so a customer that has opened one can never be removed.
    pub fn remove_customer(&mut self, customer_id: &str) -> Result<Customer, LedgerError> {
        let customer = self
            .customer(customer_id)
            .ok_or_else(|| LedgerError::CustomerNotFound(customer_id.to_string()))?;
        if !customer.account_numbers().is_empty() {
            return Err(LedgerError::CustomerHasAccounts(customer_id.to_string()));
        }
        info!(customer = %customer_id, "customer removed");
        self.customers
            .remove(customer_id)
            .ok_or_else(|| LedgerError::CustomerNotFound(customer_id.to_string()))
    }

    /// Opens an account of the given type for an existing customer.
    /// An account number is only consumed when the account is actually created.
    pub fn create_account(
        &mut self,
        customer_id: &str,
        account_type: &str,
        initial_balance: Money,
        terms: AccountTerms,
    ) -> Result<&Account, LedgerError> {
        let customer = self
            .customers
            .get_mut(customer_id)
            .ok_or_else(|| LedgerError::CustomerNotFound(customer_id.to_string()))?;
        let account_type: AccountType = account_type.parse()?;

        let number = self.next_account_number.to_string();
        self.next_account_number += 1;

        let account = Account::new(
            number.clone(),
            customer_id.to_string(),
            account_type,
            initial_balance,
            terms,
        );
        info!(customer = %customer_id, %account, "account opened");
        customer.add_account_number(number.clone());
        Ok(self.accounts.entry(number).or_insert(account))
    }

    /// Gets a customer by ID.
    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.get(customer_id)
    }

    /// All customers, ordered by ID.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// Gets an account by account number.
    pub fn account(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    /// Looks up an account for modification.
    pub fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }

    /// Deposits into the account with the given number.
    pub fn deposit(&mut self, account_number: &str, amount: Money) -> Result<(), LedgerError> {
        self.account_mut(account_number)?.deposit(amount)
    }

    /// Withdraws from the account with the given number, subject to its type's rules.
    pub fn withdraw(&mut self, account_number: &str, amount: Money) -> Result<(), LedgerError> {
        self.account_mut(account_number)?.withdraw(amount)
    }

    /// Moves `amount` between two accounts. The source is debited first and the
    /// destination credited only once the debit succeeded; if the credit is
    /// refused the debit is reversed, so either both balances change or neither does.
    pub fn transfer_funds(
        &mut self,
        from: &str,
        to: &str,
        amount: Money,
    ) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(to) {
            return Err(LedgerError::AccountNotFound(to.to_string()));
        }
        self.account_mut(from)?.withdraw(amount)?;
        if let Err(err) = self.account_mut(to)?.deposit(amount) {
            self.account_mut(from)?.reverse_withdrawal(amount);
            return Err(err);
        }
        info!(from, to, amount, "transfer completed");
        Ok(())
    }

    /// The customer's accounts in the order they were opened. Unknown
    /// customers have no accounts; numbers without a registered account are skipped.
    pub fn get_customer_accounts(&self, customer_id: &str) -> Vec<&Account> {
        self.customer(customer_id)
            .map(|customer| {
                customer
                    .account_numbers()
                    .iter()
                    .filter_map(|number| self.account(number))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Applies one period of interest to every savings account.
    /// An account whose balance would overflow is left unchanged and skipped.
    pub fn apply_all_interest(&mut self) {
        let mut swept = 0;
        for account in self.accounts.values_mut() {
            let number = account.number().to_string();
            if let Some(mut savings) = account.savings_mut() {
                match savings.apply_interest() {
                    Ok(()) => swept += 1,
                    Err(e) => warn!(account = %number, error = %e, "interest not applied"),
                }
            }
        }
        info!(accounts = swept, "interest applied");
    }
}
