#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::header::ContentType;
    use actix_web::{test, App};
    use booking::api::app::configure;
    use booking::api::routes::BookingIdResponse;
    use booking::domain::model::{BookingView, EnrollmentSnapshot, TicketSnapshot, TicketStatus};
    use booking::infra::auth::jwt::JwtManager;
    use booking::infra::repository::memory::MemoryRepository;
    use std::sync::Arc;

    const SECRET_KEY: &str = "53b65289550252052c61406f0f3dad24";

    fn seeded_repo() -> Arc<MemoryRepository> {
        let repo = Arc::new(MemoryRepository::new());
        repo.add_hotel(1, "Grand Plaza", "https://example.com/plaza.jpg");
        repo.add_room(10, 1, "101", 1);
        repo.add_room(11, 1, "102", 2);
        repo
    }

    fn bearer(user_id: i32) -> (actix_web::http::header::HeaderName, String) {
        let token = JwtManager::new(SECRET_KEY.to_string()).gen_user_token(user_id);
        (
            actix_web::http::header::AUTHORIZATION,
            format!("Bearer {}", token),
        )
    }

    macro_rules! init_app {
        ($repo:expr) => {
            test::init_service(App::new().configure(configure(
                Arc::clone(&$repo) as Arc<_>,
                Arc::clone(&$repo) as Arc<_>,
                SECRET_KEY.to_string(),
            )))
            .await
        };
    }

    #[actix_web::test]
    async fn test_booking_requires_token() {
        let repo = seeded_repo();
        let app = init_app!(repo);

        let req = test::TestRequest::get().uri("/booking").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401);

        let req = test::TestRequest::get()
            .insert_header((
                actix_web::http::header::AUTHORIZATION,
                "Bearer not-a-token".to_string(),
            ))
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_get_booking_without_booking() {
        let repo = seeded_repo();
        repo.enroll_with_paid_ticket(1);
        let app = init_app!(repo);

        let req = test::TestRequest::get()
            .insert_header(bearer(1))
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_booking_lifecycle() {
        let repo = seeded_repo();
        repo.enroll_with_paid_ticket(1);
        let app = init_app!(repo);

        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload(r#"{"roomId": 10}"#)
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let created: BookingIdResponse =
            serde_json::from_slice(&body).expect("Failed to parse json");

        let req = test::TestRequest::get()
            .insert_header(bearer(1))
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let view: BookingView = serde_json::from_slice(&body).expect("Failed to parse json");
        assert_eq!(view.id, created.booking_id);
        assert_eq!(view.room.id, 10);

        let req = test::TestRequest::put()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload(r#"{"roomId": 11}"#)
            .uri(&format!("/booking/{}", created.booking_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = test::TestRequest::get()
            .insert_header(bearer(1))
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body = to_bytes(resp.into_body()).await.unwrap();
        let view: BookingView = serde_json::from_slice(&body).expect("Failed to parse json");
        assert_eq!(view.id, created.booking_id);
        assert_eq!(view.room.id, 11);
    }

    #[actix_web::test]
    async fn test_post_booking_full_room() {
        let repo = seeded_repo();
        repo.enroll_with_paid_ticket(1);
        repo.enroll_with_paid_ticket(2);
        let app = init_app!(repo);

        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload(r#"{"roomId": 10}"#)
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(2))
            .set_payload(r#"{"roomId": 10}"#)
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);
        assert_eq!(
            std::str::from_utf8(&to_bytes(resp.into_body()).await.unwrap()).unwrap(),
            "room has reached maximum capacity"
        );
    }

    #[actix_web::test]
    async fn test_post_booking_gating() {
        let repo = seeded_repo();
        repo.set_enrollment(
            2,
            EnrollmentSnapshot {
                ticket: Some(TicketSnapshot {
                    status: TicketStatus::Reserved,
                    includes_hotel: true,
                    is_remote: false,
                }),
            },
        );
        let app = init_app!(repo);

        // user 1 has no enrollment at all
        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload(r#"{"roomId": 10}"#)
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);
        assert_eq!(
            std::str::from_utf8(&to_bytes(resp.into_body()).await.unwrap()).unwrap(),
            "missing enrollment"
        );

        // user 2 still owes payment
        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(2))
            .set_payload(r#"{"roomId": 10}"#)
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);
        assert_eq!(
            std::str::from_utf8(&to_bytes(resp.into_body()).await.unwrap()).unwrap(),
            "ticket unpaid"
        );
    }

    #[actix_web::test]
    async fn test_post_booking_unknown_room() {
        let repo = seeded_repo();
        repo.enroll_with_paid_ticket(1);
        let app = init_app!(repo);

        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload(r#"{"roomId": 999}"#)
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_post_booking_bad_body() {
        let repo = seeded_repo();
        repo.enroll_with_paid_ticket(1);
        let app = init_app!(repo);

        let req = test::TestRequest::post()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload("{}")
            .uri("/booking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_put_booking_without_booking() {
        let repo = seeded_repo();
        repo.enroll_with_paid_ticket(1);
        let app = init_app!(repo);

        let req = test::TestRequest::put()
            .insert_header(ContentType::json())
            .insert_header(bearer(1))
            .set_payload(r#"{"roomId": 11}"#)
            .uri("/booking/1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);
        assert_eq!(
            std::str::from_utf8(&to_bytes(resp.into_body()).await.unwrap()).unwrap(),
            "no existing booking"
        );
    }
}
