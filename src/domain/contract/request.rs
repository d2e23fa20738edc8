//! Contract request entity and its status machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    ContractId, ContractRequestId, DomainError, Money, Timestamp, UserId,
};

/// Lifecycle of a supplier's bid.
///
/// ```text
/// Pending ──approve──▶ Ongoing ──complete──▶ Completed
///    │
///    └──reject──▶ Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Ongoing,
    Completed,
    Rejected,
}

impl RequestStatus {
    /// Whether this status may transition to `next`.
    pub fn can_become(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Ongoing) | (Pending, Rejected) | (Ongoing, Completed)
        )
    }

    /// A request still contending for or holding the contract.
    pub fn is_active(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Ongoing)
    }

    /// Stable string form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Ongoing => "ongoing",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A supplier's bid against a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    pub id: ContractRequestId,
    pub contract_id: ContractId,
    pub supplier_id: UserId,
    pub message: String,
    /// The supplier's price for the work, which may differ from the
    /// contract's posted amount.
    pub counter_offer: Money,
    pub status: RequestStatus,
    pub owner_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContractRequest {
    /// Submits a new pending request.
    pub fn submit(
        contract_id: ContractId,
        supplier_id: UserId,
        message: impl Into<String>,
        counter_offer: Money,
    ) -> Result<Self, DomainError> {
        if !counter_offer.is_positive() {
            return Err(DomainError::validation(
                "counter_offer",
                "Counter offer must be positive",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: ContractRequestId::new(),
            contract_id,
            supplier_id,
            message: message.into(),
            counter_offer,
            status: RequestStatus::Pending,
            owner_approved: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn transition_to(&mut self, next: RequestStatus) -> Result<(), DomainError> {
        if !self.status.can_become(next) {
            return Err(DomainError::invalid_transition(self.status, next));
        }
        self.status = next;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Owner accepts this bid. The request starts running.
    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.transition_to(RequestStatus::Ongoing)?;
        self.owner_approved = true;
        Ok(())
    }

    /// Owner declines this bid.
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.transition_to(RequestStatus::Rejected)
    }

    /// The running work is done.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(RequestStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContractRequest {
        ContractRequest::submit(
            ContractId::new(),
            UserId::new(),
            "I can do this for less",
            Money::from_cents(90_000),
        )
        .unwrap()
    }

    #[test]
    fn submitted_request_is_pending_and_unapproved() {
        let r = request();
        assert_eq!(r.status, RequestStatus::Pending);
        assert!(!r.owner_approved);
    }

    #[test]
    fn zero_counter_offer_is_rejected() {
        let result =
            ContractRequest::submit(ContractId::new(), UserId::new(), "", Money::ZERO);
        assert!(result.is_err());
    }

    #[test]
    fn approve_moves_to_ongoing_and_flags_approval() {
        let mut r = request();
        r.approve().unwrap();
        assert_eq!(r.status, RequestStatus::Ongoing);
        assert!(r.owner_approved);
    }

    #[test]
    fn complete_requires_ongoing() {
        let mut r = request();
        assert!(r.complete().is_err());
        r.approve().unwrap();
        r.complete().unwrap();
        assert_eq!(r.status, RequestStatus::Completed);
    }

    #[test]
    fn rejected_request_is_terminal() {
        let mut r = request();
        r.reject().unwrap();
        assert!(r.approve().is_err());
        assert!(r.complete().is_err());
        assert_eq!(r.status, RequestStatus::Rejected);
    }

    #[test]
    fn ongoing_request_cannot_be_rejected() {
        let mut r = request();
        r.approve().unwrap();
        assert!(r.reject().is_err());
    }

    #[test]
    fn active_covers_pending_and_ongoing() {
        assert!(RequestStatus::Pending.is_active());
        assert!(RequestStatus::Ongoing.is_active());
        assert!(!RequestStatus::Completed.is_active());
        assert!(!RequestStatus::Rejected.is_active());
    }
}
