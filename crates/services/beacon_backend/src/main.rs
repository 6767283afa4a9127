// File: services/beacon_backend/src/main.rs
use axum::{routing::get, Router};
use beacon_config::load_config;
#[cfg(feature = "fcm")]
use beacon_fcm::routes as fcm_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

#[tokio::main]
async fn main() {
    beacon_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let api_router =
        Router::new().route("/", get(|| async { "Welcome to the Beacon API!" }));

    #[cfg(feature = "fcm")]
    let fcm_router = if beacon_common::is_fcm_enabled(&config) {
        Some(fcm_routes(config.clone()).await)
    } else {
        info!("FCM integration disabled by configuration");
        None
    };

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router.merge(beacon_common::routes());
        #[cfg(feature = "fcm")]
        {
            if let Some(fcm_router) = fcm_router {
                router = router.merge(fcm_router);
            }
        }
        router
    });

    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "fcm")]
        use beacon_fcm::doc::FcmApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Beacon API",
                version = "0.1.0",
                description = "Beacon push-notification service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Beacon", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        // Create the merged OpenAPI document
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "fcm")]
        openapi_doc.merge(FcmApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        // Create the Swagger UI route, referencing the merged doc
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        // Merge the Swagger UI into the main app router
        app = app.merge(swagger_ui);
    }

    // Serve the PWA bundle (manifest, service worker, icons) in dev mode
    if cfg!(debug_assertions) {
        println!("Running in development mode, serving static files from ./public");
        app = app.fallback_service(ServeDir::new("public"));
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
