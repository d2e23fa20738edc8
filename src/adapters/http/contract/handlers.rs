//! HTTP handlers for contract endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{not_found, ApiError};
use crate::adapters::http::identity::handlers::parse_id;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::contract::{
    ApproveRequestCommand, ApproveRequestHandler, CompleteRequestCommand, CompleteRequestHandler,
    CreateContractCommand, CreateContractHandler, DeleteContractCommand, DeleteContractHandler,
    GetContractHandler, GetContractQuery, ListContractRequestsQuery, ListContractsHandler,
    ListMyContractsQuery, ListMyRequestsQuery, ListOpenContractsQuery, ListRequestsHandler,
    MarkContractPaidCommand, MarkContractPaidHandler, RejectRequestCommand, RejectRequestHandler,
    SubmitRequestCommand, SubmitRequestHandler, UpdateContractCommand, UpdateContractHandler,
};
use crate::domain::foundation::{ContractId, ContractRequestId, Money, PageQuery, StoreId};

use super::dto::{
    ContractRequestResponse, ContractResponse, CreateContractRequest, SubmitRequestRequest,
    UpdateContractRequest,
};

#[derive(Clone)]
pub struct ContractAppState {
    pub create_handler: Arc<CreateContractHandler>,
    pub get_handler: Arc<GetContractHandler>,
    pub list_handler: Arc<ListContractsHandler>,
    pub update_handler: Arc<UpdateContractHandler>,
    pub delete_handler: Arc<DeleteContractHandler>,
    pub submit_handler: Arc<SubmitRequestHandler>,
    pub list_requests_handler: Arc<ListRequestsHandler>,
    pub approve_handler: Arc<ApproveRequestHandler>,
    pub reject_handler: Arc<RejectRequestHandler>,
    pub complete_handler: Arc<CompleteRequestHandler>,
    pub mark_paid_handler: Arc<MarkContractPaidHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// Contract handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/contracts
pub async fn create_contract(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateContractRequest>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&req.store_id, "store id")?;
    let contract = state
        .create_handler
        .handle(
            CreateContractCommand {
                store_id,
                title: req.title,
                description: req.description,
                amount: Money::from_cents(req.amount_cents),
                starts_on: req.starts_on,
                ends_on: req.ends_on,
            },
            &user,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ContractResponse::from(contract))).into_response())
}

/// GET /api/contracts - contracts open for bidding
pub async fn list_open_contracts(
    State(state): State<ContractAppState>,
    RequireAuth(_user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let contracts = state
        .list_handler
        .handle_open(ListOpenContractsQuery { page })
        .await?;
    Ok(Json(contracts.map(ContractResponse::from)).into_response())
}

/// GET /api/contracts/mine
pub async fn list_my_contracts(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let contracts = state
        .list_handler
        .handle_mine(ListMyContractsQuery { page }, &user)
        .await?;
    Ok(Json(contracts.map(ContractResponse::from)).into_response())
}

/// GET /api/contracts/:id
pub async fn get_contract(
    State(state): State<ContractAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let contract_id = parse_id::<ContractId>(&id, "contract id")?;
    match state
        .get_handler
        .handle(GetContractQuery { contract_id })
        .await?
    {
        Some(contract) => Ok(Json(ContractResponse::from(contract)).into_response()),
        None => Ok(not_found("Contract", contract_id)),
    }
}

/// PATCH /api/contracts/:id
pub async fn update_contract(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateContractRequest>,
) -> Result<Response, ApiError> {
    let contract_id = parse_id::<ContractId>(&id, "contract id")?;
    let contract = state
        .update_handler
        .handle(
            UpdateContractCommand {
                contract_id,
                title: req.title,
                description: req.description,
                amount: req.amount_cents.map(Money::from_cents),
                starts_on: req.starts_on,
                ends_on: req.ends_on,
            },
            &user,
        )
        .await?;
    Ok(Json(ContractResponse::from(contract)).into_response())
}

/// DELETE /api/contracts/:id
pub async fn delete_contract(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let contract_id = parse_id::<ContractId>(&id, "contract id")?;
    state
        .delete_handler
        .handle(DeleteContractCommand { contract_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /api/contracts/:id/paid
pub async fn mark_contract_paid(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let contract_id = parse_id::<ContractId>(&id, "contract id")?;
    state
        .mark_paid_handler
        .handle(MarkContractPaidCommand { contract_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Request handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/contracts/:id/requests
pub async fn submit_request(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequestRequest>,
) -> Result<Response, ApiError> {
    let contract_id = parse_id::<ContractId>(&id, "contract id")?;
    let request = state
        .submit_handler
        .handle(
            SubmitRequestCommand {
                contract_id,
                message: req.message,
                counter_offer: Money::from_cents(req.counter_offer_cents),
            },
            &user,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ContractRequestResponse::from(request))).into_response())
}

/// GET /api/contracts/:id/requests
pub async fn list_contract_requests(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let contract_id = parse_id::<ContractId>(&id, "contract id")?;
    let requests = state
        .list_requests_handler
        .handle_for_contract(ListContractRequestsQuery { contract_id }, &user)
        .await?;
    let requests: Vec<ContractRequestResponse> =
        requests.into_iter().map(ContractRequestResponse::from).collect();
    Ok(Json(requests).into_response())
}

/// GET /api/requests/mine
pub async fn list_my_requests(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let requests = state
        .list_requests_handler
        .handle_mine(ListMyRequestsQuery { page }, &user)
        .await?;
    Ok(Json(requests.map(ContractRequestResponse::from)).into_response())
}

/// POST /api/requests/:id/approve
pub async fn approve_request(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let request_id = parse_id::<ContractRequestId>(&id, "request id")?;
    state
        .approve_handler
        .handle(ApproveRequestCommand { request_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /api/requests/:id/reject
pub async fn reject_request(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let request_id = parse_id::<ContractRequestId>(&id, "request id")?;
    state
        .reject_handler
        .handle(RejectRequestCommand { request_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /api/requests/:id/complete
pub async fn complete_request(
    State(state): State<ContractAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let request_id = parse_id::<ContractRequestId>(&id, "request id")?;
    state
        .complete_handler
        .handle(CompleteRequestCommand { request_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
