use crate::domain::eligibility::IneligibleReason;
use crate::infra::auth::jwt::JwtManager;
use crate::service::booking::{AppError, BookingService};
use crate::service::hotels::HotelsService;
use actix_web::{get, post, put, web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BookingBody {
    room_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: i32,
}

fn booking_error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::NotFound => HttpResponse::NotFound().body("not found"),
        AppError::Ineligible(reason) => HttpResponse::Forbidden().body(reason.to_string()),
        AppError::AlreadyBooked => HttpResponse::Forbidden().body("user already has a booking"),
        AppError::CapacityExceeded => {
            HttpResponse::Forbidden().body("room has reached maximum capacity")
        }
        AppError::Internal(err) => {
            log::error!(err:? = err; "Internal error");
            HttpResponse::InternalServerError().body("Internal Server Error")
        }
    }
}

// Hotel browsing keeps its historical status mapping: a user with no
// enrollment or ticket gets 404, a ticket failing the hotel gate gets 402.
fn hotels_error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::Ineligible(
            IneligibleReason::MissingEnrollment | IneligibleReason::MissingTicket,
        ) => HttpResponse::NotFound().body("not found"),
        AppError::Ineligible(reason) => HttpResponse::PaymentRequired().body(reason.to_string()),
        other => booking_error_response(other),
    }
}

#[get("/booking")]
pub(crate) async fn get_booking(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
    bookings: web::Data<BookingService>,
) -> impl Responder {
    let claims = match jwt_manager.extract_claims_from_req(&req) {
        Ok(claims) => claims,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    match bookings.get_booking(claims.sub).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => booking_error_response(err),
    }
}

#[post("/booking")]
pub(crate) async fn post_booking(
    req: HttpRequest,
    req_body: String,
    jwt_manager: web::Data<JwtManager>,
    bookings: web::Data<BookingService>,
) -> impl Responder {
    let claims = match jwt_manager.extract_claims_from_req(&req) {
        Ok(claims) => claims,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    let body = match serde_json::from_str::<BookingBody>(req_body.as_str()) {
        Ok(body) => body,
        Err(err) => return HttpResponse::BadRequest().body(format!("err: {:?}", err)),
    };

    match bookings.create_booking(claims.sub, body.room_id).await {
        Ok(booking_id) => {
            log::info!(user_id = claims.sub, room_id = body.room_id; "Booking created");
            HttpResponse::Ok().json(&BookingIdResponse { booking_id })
        }
        Err(err) => booking_error_response(err),
    }
}

#[put("/booking/{booking_id}")]
pub(crate) async fn put_booking(
    req: HttpRequest,
    path: web::Path<i32>,
    req_body: String,
    jwt_manager: web::Data<JwtManager>,
    bookings: web::Data<BookingService>,
) -> impl Responder {
    let claims = match jwt_manager.extract_claims_from_req(&req) {
        Ok(claims) => claims,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    let body = match serde_json::from_str::<BookingBody>(req_body.as_str()) {
        Ok(body) => body,
        Err(err) => return HttpResponse::BadRequest().body(format!("err: {:?}", err)),
    };

    let booking_id = path.into_inner();
    match bookings
        .move_booking(claims.sub, booking_id, body.room_id)
        .await
    {
        Ok(booking_id) => {
            log::info!(user_id = claims.sub, room_id = body.room_id; "Booking moved");
            HttpResponse::Ok().json(&BookingIdResponse { booking_id })
        }
        Err(err) => booking_error_response(err),
    }
}

#[get("/hotels")]
pub(crate) async fn get_hotels(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
    hotels: web::Data<HotelsService>,
) -> impl Responder {
    let claims = match jwt_manager.extract_claims_from_req(&req) {
        Ok(claims) => claims,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    match hotels.get_hotels(claims.sub).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => hotels_error_response(err),
    }
}

#[get("/hotels/{hotel_id}")]
pub(crate) async fn get_hotel(
    req: HttpRequest,
    path: web::Path<i32>,
    jwt_manager: web::Data<JwtManager>,
    hotels: web::Data<HotelsService>,
) -> impl Responder {
    let claims = match jwt_manager.extract_claims_from_req(&req) {
        Ok(claims) => claims,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    match hotels.get_hotel(claims.sub, path.into_inner()).await {
        Ok(hotel) => HttpResponse::Ok().json(hotel),
        Err(err) => hotels_error_response(err),
    }
}
