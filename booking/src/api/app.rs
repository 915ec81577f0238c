use crate::api::routes::{get_booking, get_hotel, get_hotels, post_booking, put_booking};
use crate::domain::repository::{BookingRepository, HotelRepository};
use crate::infra::auth::jwt::JwtManager;
use crate::infra::repository::booking::PgBookingRepository;
use crate::infra::repository::hotel::PgHotelRepository;
use crate::service::booking::BookingService;
use crate::service::hotels::HotelsService;
use actix_web::web;
use actix_web::web::ServiceConfig;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

pub fn create_app(pool: Pool<Postgres>, secret_key: String) -> Box<dyn Fn(&mut ServiceConfig)> {
    let booking_repo = Arc::new(PgBookingRepository::new(pool.clone()));
    let hotel_repo = Arc::new(PgHotelRepository::new(pool));

    configure(booking_repo, hotel_repo, secret_key)
}

/// Repository handles are injected here so the endpoint tests can wire the
/// in-memory gateway in place of Postgres.
pub fn configure(
    booking_repo: Arc<dyn BookingRepository>,
    hotel_repo: Arc<dyn HotelRepository>,
    secret_key: String,
) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        let jwt_manager = web::Data::new(JwtManager::new(secret_key.clone()));

        let booking_service = web::Data::new(BookingService::new(Arc::clone(&booking_repo)));
        let hotels_service = web::Data::new(HotelsService::new(
            Arc::clone(&booking_repo),
            Arc::clone(&hotel_repo),
        ));

        cfg.app_data(jwt_manager)
            .app_data(booking_service)
            .app_data(hotels_service)
            .service(get_booking)
            .service(post_booking)
            .service(put_booking)
            .service(get_hotels)
            .service(get_hotel);
    })
}
