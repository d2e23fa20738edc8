//! Contract aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContractId, DomainError, Money, StoreId, Timestamp, UserId};

/// An owner-authored work agreement open for supplier bidding.
///
/// `open` gates bidding: approving a request closes the contract.
/// `paid` is flipped once, by the owner, after a request completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub store_id: StoreId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    /// The owner's posted budget for the work.
    pub amount: Money,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub paid: bool,
    pub open: bool,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contract {
    /// Posts a new contract, open for bidding.
    pub fn post(
        store_id: StoreId,
        owner_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Contract title cannot be empty"));
        }
        if !amount.is_positive() {
            return Err(DomainError::validation("amount", "Contract amount must be positive"));
        }
        if ends_on < starts_on {
            return Err(DomainError::validation(
                "ends_on",
                "Contract end date cannot be before its start date",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: ContractId::new(),
            store_id,
            owner_id,
            title,
            description: description.into(),
            amount,
            starts_on,
            ends_on,
            paid: false,
            open: true,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// True while suppliers may still submit requests.
    pub fn accepts_requests(&self) -> bool {
        self.open && !self.deleted
    }

    /// Closes the contract to further bidding. Called when a request is
    /// approved.
    pub fn close_bidding(&mut self) {
        self.open = false;
        self.updated_at = Timestamp::now();
    }

    /// Marks the contract paid. Callers must first verify a completed
    /// request exists.
    pub fn mark_paid(&mut self) -> Result<(), DomainError> {
        if self.paid {
            return Err(DomainError::conflict("Contract is already paid"));
        }
        self.paid = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
    }

    fn contract() -> Contract {
        let (starts, ends) = dates();
        Contract::post(
            StoreId::new(),
            UserId::new(),
            "Warehouse refit",
            "Shelving and lighting",
            Money::from_cents(500_000),
            starts,
            ends,
        )
        .unwrap()
    }

    #[test]
    fn posted_contract_is_open_and_unpaid() {
        let c = contract();
        assert!(c.accepts_requests());
        assert!(!c.paid);
    }

    #[test]
    fn rejects_inverted_date_range() {
        let (starts, ends) = dates();
        let result = Contract::post(
            StoreId::new(),
            UserId::new(),
            "Refit",
            "",
            Money::from_cents(100),
            ends,
            starts,
        );
        assert!(result.is_err());
    }

    #[test]
    fn single_day_contract_is_allowed() {
        let (starts, _) = dates();
        let result = Contract::post(
            StoreId::new(),
            UserId::new(),
            "One-day job",
            "",
            Money::from_cents(100),
            starts,
            starts,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn closed_contract_stops_accepting_requests() {
        let mut c = contract();
        c.close_bidding();
        assert!(!c.accepts_requests());
    }

    #[test]
    fn deleted_contract_stops_accepting_requests() {
        let mut c = contract();
        c.soft_delete();
        assert!(!c.accepts_requests());
    }

    #[test]
    fn mark_paid_is_not_repeatable() {
        let mut c = contract();
        c.mark_paid().unwrap();
        assert!(c.mark_paid().is_err());
    }
}
