//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI serves interactive documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application router with every API endpoint and the Swagger UI.
///
/// Routes under `/api/protected` require a resident-realm bearer token,
/// `/api/super-admin` (except setup and login) a console token, and the rest
/// are public by design: pre-login probes and the processor webhook.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Koina", description = "Koina building expense API"), tags(
        (name = controller::user::USER_TAG, description = "Identity and account sync routes"),
        (name = controller::building::BUILDING_TAG, description = "Building management routes"),
        (name = controller::apartment::APARTMENT_TAG, description = "Apartment management routes"),
        (name = controller::expense::EXPENSE_TAG, description = "Expense management routes"),
        (name = controller::payment::PAYMENT_TAG, description = "Payment checkout and webhook routes"),
        (name = controller::notification::NOTIFICATION_TAG, description = "Notification routes"),
        (name = controller::admin::ADMIN_TAG, description = "Super-admin console routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::user::check_phone))
        .routes(routes!(controller::user::sync_user))
        .routes(routes!(controller::user::get_profile))
        .routes(routes!(
            controller::building::list_buildings,
            controller::building::create_building
        ))
        .routes(routes!(
            controller::building::update_building,
            controller::building::delete_building
        ))
        .routes(routes!(
            controller::apartment::list_apartments,
            controller::apartment::create_apartment
        ))
        .routes(routes!(
            controller::apartment::update_apartment,
            controller::apartment::delete_apartment
        ))
        .routes(routes!(
            controller::expense::list_expenses,
            controller::expense::create_expense
        ))
        .routes(routes!(
            controller::expense::update_expense,
            controller::expense::delete_expense
        ))
        .routes(routes!(controller::payment::create_checkout_session))
        .routes(routes!(controller::payment::list_payments))
        .routes(routes!(controller::payment::webhook))
        .routes(routes!(controller::notification::list_notifications))
        .routes(routes!(controller::notification::mark_notification_read))
        .routes(routes!(controller::admin::setup))
        .routes(routes!(controller::admin::login))
        .routes(routes!(controller::admin::get_admin_profile))
        .routes(routes!(controller::admin::change_password))
        .routes(routes!(
            controller::admin::list_managers,
            controller::admin::create_manager
        ))
        .routes(routes!(
            controller::admin::update_manager,
            controller::admin::delete_manager
        ))
        .routes(routes!(controller::admin::list_residents))
        .routes(routes!(controller::admin::list_subscriptions))
        .routes(routes!(controller::admin::stats))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
