use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{FieldDescriptor, FieldKind, FormSchema};

pub const USER_INFO: &str = "userInfo";
pub const ADDRESS_INFO: &str = "addressInfo";
pub const PAYMENT_INFO: &str = "paymentInfo";

static CATALOGUE: Lazy<Vec<Arc<FormSchema>>> = Lazy::new(|| {
    vec![user_info(), address_info(), payment_info()]
        .into_iter()
        .map(Arc::new)
        .collect()
});

pub(super) fn schemas() -> &'static [Arc<FormSchema>] {
    &CATALOGUE
}

fn user_info() -> FormSchema {
    FormSchema::new(
        USER_INFO,
        "User Information",
        vec![
            FieldDescriptor::new("firstName", "First Name", FieldKind::Text),
            FieldDescriptor::new("lastName", "Last Name", FieldKind::Text),
            FieldDescriptor::new("age", "Age", FieldKind::Number).optional(),
        ],
    )
}

fn address_info() -> FormSchema {
    FormSchema::new(
        ADDRESS_INFO,
        "Address Information",
        vec![
            FieldDescriptor::new("street", "Street", FieldKind::Text),
            FieldDescriptor::new("city", "City", FieldKind::Text),
            FieldDescriptor::new(
                "state",
                "State",
                FieldKind::dropdown(["Maharashtra", "Kerala", "Tamilnadu"]),
            ),
            FieldDescriptor::new("zipCode", "Zip Code", FieldKind::Number).optional(),
        ],
    )
}

fn payment_info() -> FormSchema {
    FormSchema::new(
        PAYMENT_INFO,
        "Payment Information",
        vec![
            FieldDescriptor::new("cardNumber", "Card Number", FieldKind::Number),
            // Expiry has no label; its required error renders bare.
            FieldDescriptor::new("expiryDate", "", FieldKind::Date),
            FieldDescriptor::new("cvv", "CVV", FieldKind::Password),
            FieldDescriptor::new("cardholderName", "Cardholder Name", FieldKind::Text),
        ],
    )
}
