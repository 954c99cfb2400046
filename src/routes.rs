use crate::{
    api::{analytics, leaves, students},
    config::Config,
    error::ApiError,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Extraction failures share the handlers' `{"message"}` error shape
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::not_found(format!("Unknown id: {err}")).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/students")
                    // /students
                    .service(
                        web::resource("")
                            .route(web::get().to(students::list_students))
                            .route(web::post().to(students::create_student)),
                    )
                    // /students/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(students::get_student))
                            .route(web::put().to(students::update_student)),
                    ),
            )
            .service(
                web::scope("/analytics")
                    .route("/summary", web::get().to(analytics::summary))
                    .route(
                        "/student-performance",
                        web::get().to(analytics::student_performance),
                    )
                    .route("/late-arrivals", web::get().to(analytics::late_arrivals))
                    .route("/trends", web::get().to(analytics::trends))
                    .route("/heatmap", web::get().to(analytics::heatmap))
                    .route("/leaves", web::get().to(analytics::leave_report)),
            )
            .service(
                web::scope("/leaves")
                    // /leaves
                    .service(
                        web::resource("")
                            .route(web::get().to(leaves::list_leaves))
                            .route(web::post().to(leaves::create_leave)),
                    )
                    // /leaves/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leaves::get_leave))
                            .route(web::put().to(leaves::edit_leave)),
                    )
                    // /leaves/{id}/status
                    .service(
                        web::resource("/{id}/status")
                            .route(web::put().to(leaves::update_leave_status)),
                    ),
            ),
    );
}
