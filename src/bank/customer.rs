//! Customers and the accounts they hold.
use std::fmt;

use crate::bank::types::{AccountNumber, CustomerId};

/// A bank customer. Holds account numbers only; the accounts themselves are
/// owned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    customer_id: CustomerId,
    name: String,
    address: String,
    /// Account numbers in the order they were opened, without duplicates.
    account_numbers: Vec<AccountNumber>,
}

impl Customer {
    /// Creates a customer holding no accounts.
    pub fn new(
        customer_id: impl Into<CustomerId>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Customer {
            customer_id: customer_id.into(),
            name: name.into(),
            address: address.into(),
            account_numbers: Vec::new(),
        }
    }

    /// Gets the customer ID.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Gets the customer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the customer's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Gets the numbers of the accounts held, oldest first.
    pub fn account_numbers(&self) -> &[AccountNumber] {
        &self.account_numbers
    }

    /// Records an account number. Does nothing if it is already recorded.
    pub fn add_account_number(&mut self, account_number: AccountNumber) {
        if !self.account_numbers.contains(&account_number) {
            self.account_numbers.push(account_number);
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer {}: {}, {} account(s)",
            self.customer_id,
            self.name,
            self.account_numbers.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Customer;

    #[test]
    fn test_add_account_number_keeps_order() {
        let mut customer = Customer::new("C1", "Alice", "1 Main St");
        customer.add_account_number("1002".to_string());
        customer.add_account_number("1000".to_string());
        assert_eq!(customer.account_numbers(), ["1002", "1000"]);
    }

    #[test]
    fn test_add_account_number_is_idempotent() {
        let mut customer = Customer::new("C1", "Alice", "1 Main St");
        customer.add_account_number("1000".to_string());
        customer.add_account_number("1000".to_string());
        assert_eq!(customer.account_numbers().len(), 1);
    }

    #[test]
    fn test_display() {
        let mut customer = Customer::new("C1", "Alice", "1 Main St");
        customer.add_account_number("1000".to_string());
        assert_eq!(customer.to_string(), "Customer C1: Alice, 1 account(s)");
    }
}
