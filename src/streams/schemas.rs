//! JSON schemas of emitted records, embedded in the binary

pub const APP_SUBSCRIPTION_SALE: &str = include_str!("../../schemas/app_subscription_sale.json");
pub const APP_SALE_ADJUSTMENT: &str = include_str!("../../schemas/app_sale_adjustment.json");
pub const APP_CREDIT: &str = include_str!("../../schemas/app_credit.json");
pub const APP_RELATIONSHIP: &str = include_str!("../../schemas/app_relationship.json");
pub const APP_SUBSCRIPTION_CHARGE: &str =
    include_str!("../../schemas/app_subscription_charge.json");
