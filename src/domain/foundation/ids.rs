//! Strongly-typed identifier value objects.
//!
//! Every aggregate gets its own UUID newtype so ids cannot be mixed up
//! across module boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a platform user.
    UserId
);
entity_id!(
    /// Unique identifier for a store (tenant).
    StoreId
);
entity_id!(
    /// Unique identifier for a catalog product.
    ProductId
);
entity_id!(
    /// Unique identifier for an order.
    OrderId
);
entity_id!(
    /// Unique identifier for a single order line.
    OrderLineId
);
entity_id!(
    /// Unique identifier for an invoice.
    InvoiceId
);
entity_id!(
    /// Unique identifier for a recorded payment.
    PaymentId
);
entity_id!(
    /// Unique identifier for a contract.
    ContractId
);
entity_id!(
    /// Unique identifier for a supplier's contract request.
    ContractRequestId
);
entity_id!(
    /// Unique identifier for a support ticket.
    TicketId
);
entity_id!(
    /// Unique identifier for a ticket reply.
    TicketReplyId
);
entity_id!(
    /// Unique identifier for an uploaded file.
    UploadId
);
