//! Axum router configuration for ticket endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    close_ticket, get_ticket, list_all_tickets, list_my_tickets, open_ticket, reply_ticket,
    TicketAppState,
};

/// Ticket routes, mounted at `/api/tickets`. All require authentication.
///
/// - `POST /` - Open a ticket
/// - `GET /` - List the caller's tickets
/// - `GET /all` - List every ticket (admin)
/// - `GET /:id` - Fetch a ticket with its replies
/// - `POST /:id/replies` - Reply (author or admin)
/// - `POST /:id/close` - Close (author or admin)
pub fn ticket_routes() -> Router<TicketAppState> {
    Router::new()
        .route("/", post(open_ticket).get(list_my_tickets))
        .route("/all", get(list_all_tickets))
        .route("/:id", get(get_ticket))
        .route("/:id/replies", post(reply_ticket))
        .route("/:id/close", post(close_ticket))
}
