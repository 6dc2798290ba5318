// src/lib.rs

//! cartflow: the controller behind a shopping cart page.
//!
//! The crate keeps the page consistent with the server-held cart:
//!  - Totals are recomputed from the authoritative item list after every
//!    mutation (`total = Σ quantity × effective price`, VAT backed out of it).
//!  - Quantities sent to the backend are clamped into `[1, 99]`.
//!  - Add, update, remove, clear and payment each run as a step flow that
//!    moves `Idle → Pending → Applied | Failed` and restores the page on
//!    failure.
//!  - The backend and the page are injected as ports ([`CartApi`],
//!    [`CartRenderer`]), so the same controller drives a browser, a terminal
//!    or a test double.

pub mod api;
pub mod error;
pub mod flow;
pub mod flows;
pub mod models;
pub mod ports;
pub mod quantity;
pub mod render;
pub mod settings;
pub mod totals;
pub mod view;
pub mod view_model;

// --- Re-exports for the Public API ---

pub use crate::api::{AddItemRequest, CartApi, Endpoints, ErrorBody, PaymentRedirect, PaymentSessionResponse, UpdateItemRequest};
pub use crate::error::{ApiError, CartError, CartResult, ErrorKind, FlowError};
pub use crate::flow::{Flow, FlowOutcome, OperationState, Shared, StepControl};
pub use crate::models::{CartItem, ItemId, Product, ProductId};
pub use crate::ports::CartPorts;
pub use crate::quantity::{Quantity, QuantityStepper};
pub use crate::render::{CartRenderer, ControlState, Notification, Redirect};
pub use crate::settings::CartSettings;
pub use crate::totals::CartTotals;
pub use crate::view::{render, BadgeView, CartRow, CartSummary, CartView, PriceTag};
pub use crate::view_model::{
  AddOutcome, CartCommand, CartViewModel, ClearOutcome, CommandOutcome, OperationKind, PageReady, RemoveOutcome,
};
