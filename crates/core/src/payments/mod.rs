//! Payments module - submission workflow, models and traits.

mod payments_model;
mod payments_service;
mod payments_traits;


pub use payments_model::{
    AllocatedPayment, NewPayment, Payment, PaymentReceipt, PendingBucketSource,
};
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
