use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use async_trait::async_trait;
use innkeep::{
    api,
    auth::AuthService,
    config::Settings,
    domain::{Booking, NewBooking, Payment},
    error::AppError,
    repository::{
        BookingRepository, InMemoryBookingRepository, InMemoryRoomRepository,
        InMemoryUserRepository,
    },
    service::ServiceContext,
};

fn app() -> Router {
    let auth_service = Arc::new(AuthService::new(24));
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let room_repo = Arc::new(InMemoryRoomRepository::with_default_catalog());
    let booking_repo = Arc::new(InMemoryBookingRepository::new());

    let service_context = Arc::new(ServiceContext::new(
        user_repo,
        room_repo,
        booking_repo,
        auth_service,
    ));

    api::create_app(service_context, Arc::new(Settings::default()))
}

fn post_json(path: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request builds")
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie present")
        .to_str()
        .expect("valid header")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn register_book_pay_invoice_flow() -> anyhow::Result<()> {
    let app = app();

    // Register
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({"name": "Alice", "email": "a@x.com", "phone": "555-0100", "password": "pw1"}),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["id"], json!(1));
    let registered_id = body["user"]["id"].clone();

    // Login resolves to the same id
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            json!({"email": "a@x.com", "password": "pw1"}),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], registered_id);

    // Current user projection includes the phone number
    let response = app.clone().oneshot(get("/api/user", Some(&cookie))).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["phone"], json!("555-0100"));

    // Book room 1 for two nights
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/bookings",
            json!({"roomId": 1, "checkIn": "2024-06-01", "checkOut": "2024-06-03", "guests": 2}),
            Some(&cookie),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["booking"]["nights"], json!(2));
    assert_eq!(body["booking"]["totalAmount"], json!(5998));
    assert_eq!(body["booking"]["status"], json!("pending"));
    let booking_id = body["booking"]["id"].as_i64().expect("booking id");

    // Availability dropped by one
    let response = app.clone().oneshot(get("/api/rooms/1", None)).await?;
    let body = body_json(response).await;
    assert_eq!(body["available"], json!(9));

    // Invoice is not available before payment
    let response = app
        .clone()
        .oneshot(get(&format!("/api/invoice/{}", booking_id), Some(&cookie)))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Pay by card
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payment",
            json!({
                "bookingId": booking_id,
                "paymentMethod": "card",
                "cardName": "Alice",
                "cardNumber": "4111111111111234",
                "expiryDate": "12/27",
                "cvv": "123"
            }),
            Some(&cookie),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["payment"]["amount"], json!(5998));
    assert_eq!(body["payment"]["status"], json!("completed"));
    assert_eq!(body["payment"]["method"], json!("card"));
    assert_eq!(body["payment"]["lastFour"], json!("1234"));
    assert_eq!(body["booking"]["status"], json!("confirmed"));

    // Paying twice is rejected
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payment",
            json!({
                "bookingId": booking_id,
                "paymentMethod": "card",
                "cardName": "Alice",
                "cardNumber": "4111111111111234",
                "expiryDate": "12/27",
                "cvv": "123"
            }),
            Some(&cookie),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Invoice downloads as a PDF attachment
    let response = app
        .clone()
        .oneshot(get(&format!("/api/invoice/{}", booking_id), Some(&cookie)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        &format!("attachment; filename=invoice-{}.pdf", booking_id)
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    assert!(bytes.starts_with(b"%PDF"));

    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_session() -> anyhow::Result<()> {
    let app = app();

    for path in ["/api/user", "/api/bookings"] {
        let response = app.clone().oneshot(get(path, None)).await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }

    let response = app
        .clone()
        .oneshot(get("/api/bookings", Some("session=bogus")))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn duplicate_email_registration_returns_400() -> anyhow::Result<()> {
    let app = app();

    let request = json!({"name": "Alice", "email": "a@x.com", "phone": "555-0100", "password": "pw1"});
    let response = app
        .clone()
        .oneshot(post_json("/api/register", request.clone(), None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/api/register", request, None))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("User already exists"));

    Ok(())
}

#[tokio::test]
async fn logout_destroys_the_session() -> anyhow::Result<()> {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({"name": "Alice", "email": "a@x.com", "phone": "555-0100", "password": "pw1"}),
            None,
        ))
        .await?;
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_json("/api/logout", json!({}), Some(&cookie)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));

    // The old cookie no longer authenticates
    let response = app.clone().oneshot(get("/api/user", Some(&cookie))).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn room_catalog_is_public() -> anyhow::Result<()> {
    let app = app();

    let response = app.clone().oneshot(get("/api/rooms", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rooms = body.as_array().expect("room list");
    assert_eq!(rooms.len(), 4);
    assert_eq!(rooms[0]["price"], json!(2999));

    let response = app.clone().oneshot(get("/api/rooms/99", None)).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn upi_payment_is_masked_on_the_wire() -> anyhow::Result<()> {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({"name": "Jane", "email": "jane@x.com", "phone": "555-0101", "password": "pw2"}),
            None,
        ))
        .await?;
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/bookings",
            json!({"roomId": 2, "checkIn": "2024-07-01", "checkOut": "2024-07-02", "guests": 1}),
            Some(&cookie),
        ))
        .await?;
    let body = body_json(response).await;
    let booking_id = body["booking"]["id"].as_i64().expect("booking id");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payment",
            json!({"bookingId": booking_id, "paymentMethod": "upi", "upiId": "jane.doe@upi"}),
            Some(&cookie),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["payment"]["method"], json!("upi"));
    assert_eq!(body["payment"]["maskedId"], json!("jan***@upi"));

    Ok(())
}

/// Booking storage that is permanently offline.
struct FailingBookingRepository;

#[async_trait]
impl BookingRepository for FailingBookingRepository {
    async fn create(&self, _new_booking: NewBooking) -> innkeep::error::Result<Booking> {
        Err(AppError::Internal("booking storage offline".to_string()))
    }

    async fn find_for_user(
        &self,
        _id: i64,
        _user_id: i64,
    ) -> innkeep::error::Result<Option<Booking>> {
        Err(AppError::Internal("booking storage offline".to_string()))
    }

    async fn list_by_user(&self, _user_id: i64) -> innkeep::error::Result<Vec<Booking>> {
        Err(AppError::Internal("booking storage offline".to_string()))
    }

    async fn confirm(&self, _id: i64, _payment: Payment) -> innkeep::error::Result<Booking> {
        Err(AppError::Internal("booking storage offline".to_string()))
    }
}

// A storage failure on the invoice route must surface as a 500, not
// get folded into the confirmed-booking 404.
#[tokio::test]
async fn invoice_route_does_not_mask_storage_failures() -> anyhow::Result<()> {
    let auth_service = Arc::new(AuthService::new(24));
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let room_repo = Arc::new(InMemoryRoomRepository::with_default_catalog());

    let service_context = Arc::new(ServiceContext::new(
        user_repo,
        room_repo,
        Arc::new(FailingBookingRepository),
        auth_service,
    ));
    let app = api::create_app(service_context, Arc::new(Settings::default()));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({"name": "Alice", "email": "a@x.com", "phone": "555-0100", "password": "pw1"}),
            None,
        ))
        .await?;
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(get("/api/invoice/1", Some(&cookie)))
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
async fn malformed_payment_details_return_400() -> anyhow::Result<()> {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            json!({"name": "Jane", "email": "jane@x.com", "phone": "555-0101", "password": "pw2"}),
            None,
        ))
        .await?;
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/bookings",
            json!({"roomId": 1, "checkIn": "2024-07-01", "checkOut": "2024-07-02", "guests": 1}),
            Some(&cookie),
        ))
        .await?;
    let body = body_json(response).await;
    let booking_id = body["booking"]["id"].as_i64().expect("booking id");

    // Card number too short
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payment",
            json!({
                "bookingId": booking_id,
                "paymentMethod": "card",
                "cardName": "Jane",
                "cardNumber": "4111",
                "expiryDate": "12/27",
                "cvv": "123"
            }),
            Some(&cookie),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // UPI id without a domain
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payment",
            json!({"bookingId": booking_id, "paymentMethod": "upi", "upiId": "janedoe"}),
            Some(&cookie),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The booking is still pending and payable
    let response = app
        .clone()
        .oneshot(get(&format!("/api/bookings/{}", booking_id), Some(&cookie)))
        .await?;
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("pending"));

    Ok(())
}
