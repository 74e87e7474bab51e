pub mod health;
pub mod meta;

use axum::{
    routing::{get, post},
    Router,
};

use crate::customers::handlers as customers;
use crate::dashboard::handlers as dashboard;
use crate::inventory::handlers as inventory;
use crate::invoices::handlers as invoices;
use crate::jobs::handlers as jobs;
use crate::marketing::handlers as marketing;
use crate::messages::handlers as messages;
use crate::schedule::handlers as schedule;
use crate::state::AppState;
use crate::vehicles::handlers as vehicles;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/meta", get(meta::handle_get_meta))
        // Customers
        .route(
            "/api/v1/customers",
            get(customers::handle_list_customers).post(customers::handle_create_customer),
        )
        .route(
            "/api/v1/customers/:id",
            get(customers::handle_get_customer).patch(customers::handle_update_customer),
        )
        // Vehicles
        .route(
            "/api/v1/vehicles",
            get(vehicles::handle_list_vehicles).post(vehicles::handle_create_vehicle),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).patch(jobs::handle_update_job_status),
        )
        // Invoices
        .route(
            "/api/v1/invoices",
            get(invoices::handle_list_invoices).post(invoices::handle_create_invoice),
        )
        .route(
            "/api/v1/invoices/:id",
            get(invoices::handle_get_invoice).patch(invoices::handle_update_invoice_status),
        )
        // Resale inventory
        .route(
            "/api/v1/inventory",
            get(inventory::handle_list_inventory).post(inventory::handle_create_inventory_vehicle),
        )
        .route(
            "/api/v1/inventory/:id",
            get(inventory::handle_get_inventory_vehicle)
                .patch(inventory::handle_update_inventory_vehicle),
        )
        // Marketing
        .route(
            "/api/v1/campaigns",
            get(marketing::handle_list_campaigns).post(marketing::handle_create_campaign),
        )
        .route("/api/v1/campaigns/:id", get(marketing::handle_get_campaign))
        .route(
            "/api/v1/campaigns/:id/send",
            post(marketing::handle_send_campaign),
        )
        .route("/api/v1/messages/send", post(messages::handle_send_message))
        // Views
        .route("/api/v1/schedule", get(schedule::handle_get_schedule))
        .route("/api/v1/dashboard", get(dashboard::handle_get_dashboard))
        .with_state(state)
}
