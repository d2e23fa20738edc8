//! HTTP DTOs for contract endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::contract::{Contract, ContractRequest, RequestStatus};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractRequest {
    pub store_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Posted budget in cents.
    pub amount_cents: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContractRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequestRequest {
    #[serde(default)]
    pub message: String,
    /// The supplier's price in cents.
    pub counter_offer_cents: i64,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ContractResponse {
    pub id: String,
    pub store_id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub amount_cents: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub paid: bool,
    pub open: bool,
    pub created_at: Timestamp,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id.to_string(),
            store_id: contract.store_id.to_string(),
            owner_id: contract.owner_id.to_string(),
            title: contract.title,
            description: contract.description,
            amount_cents: contract.amount.cents(),
            starts_on: contract.starts_on,
            ends_on: contract.ends_on,
            paid: contract.paid,
            open: contract.open,
            created_at: contract.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractRequestResponse {
    pub id: String,
    pub contract_id: String,
    pub supplier_id: String,
    pub message: String,
    pub counter_offer_cents: i64,
    pub status: RequestStatus,
    pub owner_approved: bool,
    pub created_at: Timestamp,
}

impl From<ContractRequest> for ContractRequestResponse {
    fn from(request: ContractRequest) -> Self {
        Self {
            id: request.id.to_string(),
            contract_id: request.contract_id.to_string(),
            supplier_id: request.supplier_id.to_string(),
            message: request.message,
            counter_offer_cents: request.counter_offer.cents(),
            status: request.status,
            owner_approved: request.owner_approved,
            created_at: request.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_contract_request_parses_dates() {
        let json = r#"{
            "store_id": "00000000-0000-0000-0000-000000000000",
            "title": "Warehouse refit",
            "amount_cents": 500000,
            "starts_on": "2026-09-01",
            "ends_on": "2026-12-31"
        }"#;
        let req: CreateContractRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.starts_on.to_string(), "2026-09-01");
        assert_eq!(req.description, "");
    }

    #[test]
    fn request_status_serializes_snake_case() {
        let json = serde_json::to_string(&RequestStatus::Ongoing).unwrap();
        assert_eq!(json, "\"ongoing\"");
    }
}
