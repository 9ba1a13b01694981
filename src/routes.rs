use crate::{
    api::{attendance, employee, holiday, report, request},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(login_limiter.clone())
                .route(web::post().to(handlers::login)),
        ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/attendance")
                    // /attendance/check-in, /attendance/check-out
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::put().to(attendance::check_out)),
                    )
                    .service(web::resource("/today").route(web::get().to(attendance::today))),
            )
            .service(
                web::scope("/requests")
                    // /requests
                    .service(
                        web::resource("")
                            .route(web::post().to(request::create_request))
                            .route(web::get().to(request::list_requests)),
                    )
                    .service(web::resource("/mine").route(web::get().to(request::my_requests)))
                    // /requests/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(request::approve_request)),
                    )
                    // /requests/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(request::reject_request)),
                    ),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/holidays")
                    // /holidays
                    .service(
                        web::resource("")
                            .route(web::post().to(holiday::create_holiday))
                            .route(web::get().to(holiday::list_holidays)),
                    )
                    // /holidays/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(holiday::delete_holiday)),
                    ),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("/daily").route(web::get().to(report::daily_report)))
                    .service(
                        web::resource("/monthly").route(web::get().to(report::monthly_report)),
                    )
                    .service(
                        web::resource("/monthly/{id}")
                            .route(web::get().to(report::monthly_detail)),
                    ),
            )
            .service(web::resource("/users").route(web::post().to(handlers::create_user))),
    );
}
