#![allow(dead_code)]

use taskdesk::config::AuthConfig;
use taskdesk::AppState;

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_hours: 1,
        // Lowest bcrypt cost keeps the tests fast.
        bcrypt_cost: 4,
    }
}

pub fn test_state() -> AppState {
    AppState::in_memory(auth_config())
}

/// Builds the full application over `$state`, the same way `main.rs` does.
macro_rules! test_app {
    ($state:expr) => {{
        let state = $state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(move |cfg| state.configure(cfg))
                .service(taskdesk::routes::health::health)
                .configure(taskdesk::routes::config),
        )
        .await
    }};
}
