use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use decklive_service::handlers;
use decklive_service::middleware::JwtAuthMiddleware;
use decklive_service::services::VideoProviderClient;
use decklive_service::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

/// JSON / urlencoded body cap.
const BODY_LIMIT: usize = 50 * 1024 * 1024;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decklive_service=info,actix_web=info".into()),
        )
        .init();

    // Fails closed: missing secrets abort startup instead of falling back
    // to anything embedded in the binary.
    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!("database connection pool established");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    let provider = VideoProviderClient::new(&config.provider);

    let bind_addr = (config.server.host.clone(), config.server.port);
    tracing::info!(host = %bind_addr.0, port = bind_addr.1, "starting decklive-service");

    let app_config = config.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(provider.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::JsonConfig::default().limit(BODY_LIMIT))
            .app_data(web::FormConfig::default().limit(BODY_LIMIT))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health::health))
                    .route("/auth/signup", web::post().to(handlers::auth::signup))
                    .route("/auth/login", web::post().to(handlers::auth::login))
                    // Public reads
                    .route("/users/{id}", web::get().to(handlers::users::get_user))
                    .route(
                        "/streams/active",
                        web::get().to(handlers::streams::list_active),
                    )
                    .route(
                        "/users/{id}/followers",
                        web::get().to(handlers::social::list_followers),
                    )
                    .route(
                        "/streams/{id}/chat",
                        web::get().to(handlers::chat::list_messages),
                    )
                    .route(
                        "/users/{id}/schedule",
                        web::get().to(handlers::schedule::list_schedule),
                    )
                    // Everything below requires a valid bearer token.
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware::new(app_config.auth.jwt_secret.clone()))
                            .route("/users/{id}", web::put().to(handlers::users::update_user))
                            .route(
                                "/users/{id}/profile-pic",
                                web::post().to(handlers::users::upload_profile_pic),
                            )
                            .route(
                                "/users/{id}/stream-key",
                                web::get().to(handlers::users::get_stream_key),
                            )
                            .route(
                                "/users/{id}/regenerate-key",
                                web::post().to(handlers::users::regenerate_key),
                            )
                            .route("/streams", web::post().to(handlers::streams::create_stream))
                            .route(
                                "/streams/{id}/end",
                                web::post().to(handlers::streams::end_stream),
                            )
                            .route(
                                "/users/{id}/follow",
                                web::post().to(handlers::social::follow_user),
                            )
                            .route(
                                "/streams/{id}/chat",
                                web::post().to(handlers::chat::post_message),
                            )
                            .route(
                                "/users/{id}/schedule",
                                web::post().to(handlers::schedule::add_entry),
                            )
                            .route(
                                "/schedules/{id}",
                                web::delete().to(handlers::schedule::delete_entry),
                            ),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
