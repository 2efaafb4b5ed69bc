//! Validated identifier and address types.
//!
//! These types enforce their invariants at construction time, so an id that
//! reaches a store is always a safe key.

mod national_id;
mod secret_name;
mod service_url;

pub use national_id::NationalId;
pub use secret_name::SecretName;
pub use service_url::ServiceUrl;
