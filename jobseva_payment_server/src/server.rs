use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use jobseva_payment_engine::{FulfillmentApi, SqliteDatabase};
use razorpay_tools::RazorpayApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{create_order, fee, health, VerifyPaymentRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let gateway = RazorpayApi::new(config.razorpay.api_config())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway_secret = config.razorpay.key_secret.clone();
    let srv = HttpServer::new(move || {
        let fulfillment_api = FulfillmentApi::new(db.clone(), gateway_secret.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("jsp::access_log"))
            .app_data(web::Data::new(fulfillment_api))
            .app_data(web::Data::new(gateway.clone()))
            .service(health)
            .service(fee)
            .service(create_order)
            .service(VerifyPaymentRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
