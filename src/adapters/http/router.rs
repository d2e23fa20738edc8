//! Application router assembly.
//!
//! Builds every repository, application handler, and module router, and
//! stacks the shared middleware (request ids, tracing, timeout, CORS,
//! bearer auth).

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::postgres::{
    PostgresContractRepository, PostgresContractRequestRepository, PostgresInvoiceRepository,
    PostgresOrderRepository, PostgresPaymentRepository, PostgresProductRepository,
    PostgresStoreRepository, PostgresTicketRepository, PostgresUploadRepository,
    PostgresUserRepository,
};
use crate::application::handlers::catalog::{
    CreateProductHandler, DeleteProductHandler, GetProductHandler, ListProductsHandler,
    UpdateProductHandler,
};
use crate::application::handlers::contract::{
    ApproveRequestHandler, CompleteRequestHandler, CreateContractHandler, DeleteContractHandler,
    GetContractHandler, ListContractsHandler, ListRequestsHandler, MarkContractPaidHandler,
    RejectRequestHandler, SubmitRequestHandler, UpdateContractHandler,
};
use crate::application::handlers::identity::{
    DeleteUserHandler, GetUserHandler, ListUsersHandler, LoginHandler, RegisterUserHandler,
    UpdateProfileHandler,
};
use crate::application::handlers::invoice::{
    GetInvoiceHandler, ListInvoicesHandler, VoidInvoiceHandler,
};
use crate::application::handlers::order::{
    CancelOrderHandler, GetOrderHandler, ListOrdersHandler, ProcessCheckoutHandler,
    UpdateOrderStatusHandler,
};
use crate::application::handlers::payment::{ListPaymentsHandler, RecordPaymentHandler};
use crate::application::handlers::store::{
    CreateStoreHandler, DeleteStoreHandler, GetStoreHandler, ListStoresHandler,
    UpdateStoreHandler,
};
use crate::application::handlers::ticket::{
    CloseTicketHandler, GetTicketHandler, ListTicketsHandler, OpenTicketHandler,
    ReplyTicketHandler,
};
use crate::application::handlers::upload::{
    DeleteUploadHandler, GetUploadHandler, ListUploadsHandler, StoreUploadHandler,
};
use crate::config::ServerConfig;
use crate::ports::{FileStore, PasswordHasher, SessionValidator, TokenIssuer};

use super::catalog::{catalog_routes, CatalogAppState};
use super::contract::{contract_routes, request_routes, ContractAppState};
use super::identity::{auth_routes, user_routes, IdentityAppState};
use super::invoice::{invoice_routes, InvoiceAppState};
use super::middleware::{auth_middleware, AuthState};
use super::order::{order_routes, OrderAppState};
use super::payment::{payment_routes, PaymentAppState};
use super::store::{store_routes, StoreAppState};
use super::ticket::{ticket_routes, TicketAppState};
use super::upload::{upload_routes, UploadAppState};

/// Everything the router needs beyond the database pool.
pub struct AppContext {
    pub pool: PgPool,
    pub session_validator: Arc<dyn SessionValidator>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub file_store: Arc<dyn FileStore>,
    /// Body limit for the upload endpoint; oversized requests get 413
    /// before any bytes are buffered.
    pub max_upload_bytes: u64,
}

/// Builds the complete application router.
pub fn build_router(ctx: AppContext, server: &ServerConfig) -> Router {
    // Repositories
    let users = Arc::new(PostgresUserRepository::new(ctx.pool.clone()));
    let stores = Arc::new(PostgresStoreRepository::new(ctx.pool.clone()));
    let products = Arc::new(PostgresProductRepository::new(ctx.pool.clone()));
    let orders = Arc::new(PostgresOrderRepository::new(ctx.pool.clone()));
    let invoices = Arc::new(PostgresInvoiceRepository::new(ctx.pool.clone()));
    let payments = Arc::new(PostgresPaymentRepository::new(ctx.pool.clone()));
    let contracts = Arc::new(PostgresContractRepository::new(ctx.pool.clone()));
    let requests = Arc::new(PostgresContractRequestRepository::new(ctx.pool.clone()));
    let tickets = Arc::new(PostgresTicketRepository::new(ctx.pool.clone()));
    let uploads = Arc::new(PostgresUploadRepository::new(ctx.pool.clone()));

    // Module states
    let identity_state = IdentityAppState {
        register_handler: Arc::new(RegisterUserHandler::new(
            users.clone(),
            ctx.password_hasher.clone(),
        )),
        login_handler: Arc::new(LoginHandler::new(
            users.clone(),
            ctx.password_hasher.clone(),
            ctx.token_issuer.clone(),
        )),
        get_handler: Arc::new(GetUserHandler::new(users.clone())),
        list_handler: Arc::new(ListUsersHandler::new(users.clone())),
        update_handler: Arc::new(UpdateProfileHandler::new(
            users.clone(),
            ctx.password_hasher.clone(),
        )),
        delete_handler: Arc::new(DeleteUserHandler::new(users.clone())),
    };

    let store_state = StoreAppState {
        create_handler: Arc::new(CreateStoreHandler::new(stores.clone())),
        get_handler: Arc::new(GetStoreHandler::new(stores.clone())),
        list_handler: Arc::new(ListStoresHandler::new(stores.clone())),
        update_handler: Arc::new(UpdateStoreHandler::new(stores.clone())),
        delete_handler: Arc::new(DeleteStoreHandler::new(stores.clone())),
    };

    let catalog_state = CatalogAppState {
        create_handler: Arc::new(CreateProductHandler::new(products.clone(), stores.clone())),
        get_handler: Arc::new(GetProductHandler::new(products.clone())),
        list_handler: Arc::new(ListProductsHandler::new(products.clone(), stores.clone())),
        update_handler: Arc::new(UpdateProductHandler::new(products.clone(), stores.clone())),
        delete_handler: Arc::new(DeleteProductHandler::new(products.clone(), stores.clone())),
    };

    let order_state = OrderAppState {
        checkout_handler: Arc::new(ProcessCheckoutHandler::new(
            orders.clone(),
            products.clone(),
            stores.clone(),
            invoices.clone(),
        )),
        get_handler: Arc::new(GetOrderHandler::new(orders.clone(), stores.clone())),
        list_handler: Arc::new(ListOrdersHandler::new(orders.clone(), stores.clone())),
        status_handler: Arc::new(UpdateOrderStatusHandler::new(orders.clone(), stores.clone())),
        cancel_handler: Arc::new(CancelOrderHandler::new(
            orders.clone(),
            stores.clone(),
            invoices.clone(),
        )),
    };

    let invoice_state = InvoiceAppState {
        get_handler: Arc::new(GetInvoiceHandler::new(
            invoices.clone(),
            orders.clone(),
            stores.clone(),
        )),
        list_handler: Arc::new(ListInvoicesHandler::new(invoices.clone(), stores.clone())),
        void_handler: Arc::new(VoidInvoiceHandler::new(
            invoices.clone(),
            orders.clone(),
            stores.clone(),
        )),
    };

    let payment_state = PaymentAppState {
        record_handler: Arc::new(RecordPaymentHandler::new(
            payments.clone(),
            invoices.clone(),
            orders.clone(),
            stores.clone(),
        )),
        list_handler: Arc::new(ListPaymentsHandler::new(
            payments.clone(),
            invoices.clone(),
            orders.clone(),
            stores.clone(),
        )),
    };

    let contract_state = ContractAppState {
        create_handler: Arc::new(CreateContractHandler::new(contracts.clone(), stores.clone())),
        get_handler: Arc::new(GetContractHandler::new(contracts.clone())),
        list_handler: Arc::new(ListContractsHandler::new(contracts.clone())),
        update_handler: Arc::new(UpdateContractHandler::new(contracts.clone(), requests.clone())),
        delete_handler: Arc::new(DeleteContractHandler::new(contracts.clone(), requests.clone())),
        submit_handler: Arc::new(SubmitRequestHandler::new(contracts.clone(), requests.clone())),
        list_requests_handler: Arc::new(ListRequestsHandler::new(
            contracts.clone(),
            requests.clone(),
        )),
        approve_handler: Arc::new(ApproveRequestHandler::new(contracts.clone(), requests.clone())),
        reject_handler: Arc::new(RejectRequestHandler::new(contracts.clone(), requests.clone())),
        complete_handler: Arc::new(CompleteRequestHandler::new(
            contracts.clone(),
            requests.clone(),
        )),
        mark_paid_handler: Arc::new(MarkContractPaidHandler::new(
            contracts.clone(),
            requests.clone(),
        )),
    };

    let ticket_state = TicketAppState {
        open_handler: Arc::new(OpenTicketHandler::new(tickets.clone())),
        get_handler: Arc::new(GetTicketHandler::new(tickets.clone(), stores.clone())),
        list_handler: Arc::new(ListTicketsHandler::new(tickets.clone())),
        reply_handler: Arc::new(ReplyTicketHandler::new(tickets.clone())),
        close_handler: Arc::new(CloseTicketHandler::new(tickets.clone())),
    };

    let upload_state = UploadAppState {
        store_handler: Arc::new(StoreUploadHandler::new(
            uploads.clone(),
            ctx.file_store.clone(),
        )),
        get_handler: Arc::new(GetUploadHandler::new(uploads.clone(), ctx.file_store.clone())),
        list_handler: Arc::new(ListUploadsHandler::new(uploads.clone())),
        delete_handler: Arc::new(DeleteUploadHandler::new(uploads.clone())),
    };

    let auth_state: AuthState = ctx.session_validator;

    let api = Router::new()
        .nest("/auth", auth_routes().with_state(identity_state.clone()))
        .nest("/users", user_routes().with_state(identity_state))
        .nest("/stores", store_routes().with_state(store_state))
        .nest("/products", catalog_routes().with_state(catalog_state))
        .nest("/orders", order_routes().with_state(order_state))
        .nest("/invoices", invoice_routes().with_state(invoice_state))
        .nest("/payments", payment_routes().with_state(payment_state))
        .nest("/contracts", contract_routes().with_state(contract_state.clone()))
        .nest("/requests", request_routes().with_state(contract_state))
        .nest("/tickets", ticket_routes().with_state(ticket_state))
        .nest(
            "/uploads",
            upload_routes()
                .layer(axum::extract::DefaultBodyLimit::max(ctx.max_upload_bytes as usize))
                .with_state(upload_state),
        );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
