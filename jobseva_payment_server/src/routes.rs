//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into
//! a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers do I/O (the gateway, the database), so every one of them is async; blocking a worker
//! thread here would stall unrelated requests.

use actix_web::{get, post, web, HttpResponse, Responder};
use jobseva_payment_engine::{fees::fee_for_category, traits::FulfillmentLedgerDatabase, FulfillmentApi};
use jsp_common::INR_CURRENCY_CODE;
use log::*;
use razorpay_tools::{new_receipt_id, OrderRequest, RazorpayApi};

use crate::{
    data_objects::{FeeResult, NewOrderParams, OrderCreatedResult, VerifyPaymentParams, VerifyResult},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------    Fee    ----------------------------------------------------
/// Route: GET /fee/{category}
///
/// Read-only lookup against the fee schedule so the checkout screen can show the amount before
/// creating an order. Unknown categories resolve to the default fee rather than a 404.
#[get("/fee/{category}")]
pub async fn fee(path: web::Path<String>) -> impl Responder {
    let category = path.into_inner();
    let amount = fee_for_category(&category);
    trace!("💻️ Fee lookup for {category}: {amount}");
    HttpResponse::Ok().json(FeeResult { category, amount: amount.value(), currency: INR_CURRENCY_CODE.into() })
}

// ----------------------------------------------   Order   ----------------------------------------------------
/// Route: POST /order
///
/// Creates a gateway-side order for the given fee and returns what the checkout widget needs to
/// open the charge UI. The request is validated before the outbound call; nothing is persisted
/// locally, so a failed call is simply retried from checkout.
#[post("/order")]
pub async fn create_order(
    body: web::Json<NewOrderParams>,
    gateway: web::Data<RazorpayApi>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    let amount = params.validate()?;
    debug!("🛍️ Creating order for job {} ({amount})", params.job_id);
    let request = OrderRequest::new(amount, INR_CURRENCY_CODE, new_receipt_id(), &params.job_id, &params.user_email);
    let order = gateway.create_order(request).await.map_err(|e| {
        warn!("🛍️ Gateway order creation failed for job {}. {e}", params.job_id);
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(OrderCreatedResult {
        success: true,
        order_id: order.id,
        amount: order.amount,
        key: gateway.key_id().to_string(),
        currency: order.currency,
    }))
}

// ----------------------------------------------   Verify  ----------------------------------------------------
route!(verify_payment => Post "/verify" impl FulfillmentLedgerDatabase);
/// Route: POST /verify
///
/// Verifies a payment callback against the shared gateway secret and, on success, records the
/// payment and its fulfillment request. Replays return the existing request with a 200; a
/// signature mismatch is a 400 with `{success: false, error}` and writes nothing.
pub async fn verify_payment<B: FulfillmentLedgerDatabase>(
    body: web::Json<VerifyPaymentParams>,
    api: web::Data<FulfillmentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let claim = body.into_inner().into_claim();
    let request = api.record_verified_payment(claim).await?;
    Ok(HttpResponse::Ok().json(VerifyResult { success: true, payment_id: request.payment_id.to_string() }))
}
