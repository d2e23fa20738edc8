//! HTTP handlers for ticket endpoints.

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
use crate::application::handlers::ticket::{
    CloseTicketCommand, CloseTicketHandler, GetTicketHandler, GetTicketQuery,
    ListAllTicketsQuery, ListMyTicketsQuery, ListTicketsHandler, OpenTicketCommand,
    OpenTicketHandler, ReplyTicketCommand, ReplyTicketHandler,
};
use crate::domain::foundation::{PageQuery, StoreId, TicketId};

use super::dto::{
    OpenTicketRequest, ReplyRequest, ReplyResponse, TicketResponse, TicketThreadResponse,
};

#[derive(Clone)]
pub struct TicketAppState {
    pub open_handler: Arc<OpenTicketHandler>,
    pub get_handler: Arc<GetTicketHandler>,
    pub list_handler: Arc<ListTicketsHandler>,
    pub reply_handler: Arc<ReplyTicketHandler>,
    pub close_handler: Arc<CloseTicketHandler>,
}

/// POST /api/tickets
pub async fn open_ticket(
    State(state): State<TicketAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<OpenTicketRequest>,
) -> Result<Response, ApiError> {
    let store_id = match req.store_id {
        Some(raw) => Some(parse_id::<StoreId>(&raw, "store id")?),
        None => None,
    };
    let ticket = state
        .open_handler
        .handle(
            OpenTicketCommand { store_id, subject: req.subject, body: req.body },
            &user,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))).into_response())
}

/// GET /api/tickets/:id
pub async fn get_ticket(
    State(state): State<TicketAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let ticket_id = parse_id::<TicketId>(&id, "ticket id")?;
    match state
        .get_handler
        .handle(GetTicketQuery { ticket_id }, &user)
        .await?
    {
        Some(thread) => Ok(Json(TicketThreadResponse::from(thread)).into_response()),
        None => Ok(not_found("Ticket", ticket_id)),
    }
}

/// GET /api/tickets
pub async fn list_my_tickets(
    State(state): State<TicketAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let tickets = state
        .list_handler
        .handle_mine(ListMyTicketsQuery { page }, &user)
        .await?;
    Ok(Json(tickets.map(TicketResponse::from)).into_response())
}

/// GET /api/tickets/all
pub async fn list_all_tickets(
    State(state): State<TicketAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let tickets = state
        .list_handler
        .handle_all(ListAllTicketsQuery { page }, &user)
        .await?;
    Ok(Json(tickets.map(TicketResponse::from)).into_response())
}

/// POST /api/tickets/:id/replies
pub async fn reply_ticket(
    State(state): State<TicketAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<ReplyRequest>,
) -> Result<Response, ApiError> {
    let ticket_id = parse_id::<TicketId>(&id, "ticket id")?;
    let reply = state
        .reply_handler
        .handle(ReplyTicketCommand { ticket_id, body: req.body }, &user)
        .await?;
    Ok((StatusCode::CREATED, Json(ReplyResponse::from(reply))).into_response())
}

/// POST /api/tickets/:id/close
pub async fn close_ticket(
    State(state): State<TicketAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let ticket_id = parse_id::<TicketId>(&id, "ticket id")?;
    state
        .close_handler
        .handle(CloseTicketCommand { ticket_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
