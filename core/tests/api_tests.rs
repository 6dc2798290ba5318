// tests/api_tests.rs
mod common;

use cartflow::{
  AddItemRequest, ApiError, CartError, CartItem, Endpoints, ErrorBody, ErrorKind, PaymentSessionResponse, Quantity,
  UpdateItemRequest,
};
use common::*;

#[test]
fn test_endpoints_resolve_against_base_url() {
  let endpoints = Endpoints::new("http://shop.local:8080/");

  assert_eq!(endpoints.base_url(), "http://shop.local:8080");
  assert_eq!(endpoints.cart(), "http://shop.local:8080/api/cart");
  assert_eq!(endpoints.add_item(), "http://shop.local:8080/api/cart/add");
  assert_eq!(endpoints.update_item(7), "http://shop.local:8080/api/cart/update/7");
  assert_eq!(endpoints.remove_item(7), "http://shop.local:8080/api/cart/remove/7");
  assert_eq!(endpoints.clear_cart(), "http://shop.local:8080/api/cart/clear");
  assert_eq!(endpoints.initiate_payment(), "http://shop.local:8080/iniciar-pago");
  assert_eq!(endpoints.page("/login"), "http://shop.local:8080/login");
  assert_eq!(endpoints.page("https://sso.example.com/login"), "https://sso.example.com/login");
}

#[test]
fn test_cart_items_accept_float_amounts() {
  let json = r#"[
    {"id": 1, "quantity": 2,
     "product": {"id": 10, "name": "Mug", "price": 1000.0, "is_promotion": true,
                 "promotion_price": 799.6, "image": "mug.jpg"}},
    {"id": 2, "quantity": 1,
     "product": {"id": 11, "name": "Tee", "price": 4990, "promotion_price": null}}
  ]"#;
  let items: Vec<CartItem> = serde_json::from_str(json).unwrap();

  assert_eq!(items[0].product.price, 1000);
  assert_eq!(items[0].product.promotion_price, Some(800));
  assert_eq!(items[0].line_total(), 1600);

  let tee = &items[1].product;
  assert_eq!(tee.price, 4990);
  assert!(!tee.is_promotion);
  assert!(!tee.promotion_active());
  assert_eq!(tee.image, None);
}

#[test]
fn test_requests_serialize_clamped_quantities() {
  let add = AddItemRequest {
    product_id: 10,
    quantity: Quantity::clamp(250),
  };
  assert_eq!(
    serde_json::to_value(&add).unwrap(),
    serde_json::json!({"product_id": 10, "quantity": 99})
  );

  let update = UpdateItemRequest {
    quantity: Quantity::clamp(0),
  };
  assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"quantity": 1}));
}

#[test]
fn test_error_body_is_optional() {
  let body: ErrorBody = serde_json::from_str(r#"{"error": "Product not found"}"#).unwrap();
  assert_eq!(body.error.as_deref(), Some("Product not found"));

  let body: ErrorBody = serde_json::from_str("{}").unwrap();
  assert_eq!(body.error, None);
}

#[test]
fn test_payment_session_requires_token_and_url() {
  let redirect = payment_session("tok-123", "https://gateway.example.com/init")
    .into_redirect()
    .unwrap();
  assert_eq!(redirect.token, "tok-123");
  assert_eq!(redirect.url, "https://gateway.example.com/init");

  let missing_token = PaymentSessionResponse {
    token: None,
    url: Some("https://gateway.example.com/init".to_string()),
  };
  let err = missing_token.into_redirect().unwrap_err();
  assert!(matches!(err, CartError::InvalidRedirect(_)));
  assert_eq!(err.kind(), ErrorKind::UserFacing);

  let blank_url = payment_session("tok-123", "   ");
  assert!(matches!(blank_url.into_redirect(), Err(CartError::InvalidRedirect(_))));

  let parsed: PaymentSessionResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
  assert!(parsed.into_redirect().is_err());
}

#[test]
fn test_api_error_helpers() {
  let err = unauthorized();
  assert!(err.is_unauthenticated());
  assert_eq!(err.server_message(), Some("User not authenticated"));

  let transport = ApiError::Transport("connection refused".to_string());
  assert!(!transport.is_unauthenticated());
  assert_eq!(transport.server_message(), None);

  let wrapped: CartError = transport.into();
  assert_eq!(wrapped.kind(), ErrorKind::Silent);
}

#[test]
fn test_null_promotion_flag_reads_as_false() {
  let json = r#"{"id": 3, "quantity": 1,
    "product": {"id": 12, "name": "Cap", "price": 7990, "is_promotion": null,
                "promotion_price": 5990, "image": null}}"#;
  let item: CartItem = serde_json::from_str(json).unwrap();

  assert!(!item.product.is_promotion);
  assert!(!item.product.promotion_active());
  assert_eq!(item.line_total(), 7990);
}
