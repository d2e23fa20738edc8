//! Axum router configuration for contract endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_request, complete_request, create_contract, delete_contract, get_contract,
    list_contract_requests, list_my_contracts, list_my_requests, list_open_contracts,
    mark_contract_paid, reject_request, submit_request, update_contract, ContractAppState,
};

/// Contract routes, mounted at `/api/contracts`. All require
/// authentication.
///
/// ## Owner endpoints
/// - `POST /` - Post a contract
/// - `GET /mine` - List own contracts
/// - `PATCH /:id` - Edit (while no bid is running)
/// - `DELETE /:id` - Soft-delete (while no bid is running)
/// - `GET /:id/requests` - Review bids
/// - `POST /:id/paid` - Mark paid (after a completed request)
///
/// ## Supplier endpoints
/// - `GET /` - Browse contracts open for bidding
/// - `POST /:id/requests` - Submit a bid with a counter-offer
///
/// ## Shared
/// - `GET /:id` - Fetch a contract
pub fn contract_routes() -> Router<ContractAppState> {
    Router::new()
        .route("/", post(create_contract).get(list_open_contracts))
        .route("/mine", get(list_my_contracts))
        .route(
            "/:id",
            get(get_contract).patch(update_contract).delete(delete_contract),
        )
        .route("/:id/paid", post(mark_contract_paid))
        .route("/:id/requests", post(submit_request).get(list_contract_requests))
}

/// Request lifecycle routes, mounted at `/api/requests`.
///
/// - `GET /mine` - A supplier's own bids
/// - `POST /:id/approve` - Owner accepts; siblings auto-reject
/// - `POST /:id/reject` - Owner declines
/// - `POST /:id/complete` - Supplier or owner finishes the work
pub fn request_routes() -> Router<ContractAppState> {
    Router::new()
        .route("/mine", get(list_my_requests))
        .route("/:id/approve", post(approve_request))
        .route("/:id/reject", post(reject_request))
        .route("/:id/complete", post(complete_request))
}
