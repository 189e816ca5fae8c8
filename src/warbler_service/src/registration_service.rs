use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use warbler_adapters::{
    config::{AllowedOrigins, prod::registration::MAX_REQUEST_BYTES},
    http::routes::{get_profile, register, register_stream},
};
use warbler_application::RegistrationPipeline;
use warbler_core::{AccountStore, ObjectStore, ProfileStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// HTTP front of the registration pipeline.
pub struct RegistrationService {
    router: Router,
    max_request_bytes: usize,
}

impl RegistrationService {
    /// Create a RegistrationService around a pipeline and the profile store it writes to
    ///
    /// # Arguments
    /// * `pipeline` - Registration pipeline serving `/register` and `/register/stream`
    /// * `profile_store` - Store read by `/users/{id}`
    pub fn new<O, A, P>(pipeline: RegistrationPipeline<O, A, P>, profile_store: P) -> Self
    where
        O: ObjectStore + Clone + 'static,
        A: AccountStore + Clone + 'static,
        P: ProfileStore + Clone + 'static,
    {
        let router = Router::new()
            .route("/register", post(register::<O, A, P>))
            .route("/register/stream", post(register_stream::<O, A, P>))
            .with_state(pipeline)
            .route("/users/{id}", get(get_profile::<P>))
            .with_state(profile_store);

        Self {
            router,
            max_request_bytes: MAX_REQUEST_BYTES,
        }
    }

    /// Cap on request bodies; registration payloads carry a base64 image.
    pub fn with_max_request_bytes(mut self, max_request_bytes: usize) -> Self {
        self.max_request_bytes = max_request_bytes;
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        self.router = self
            .router
            .layer(DefaultBodyLimit::max(self.max_request_bytes));

        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Registration service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
