//! GraphQL query templates embedded in the binary

pub const APP_SUBSCRIPTION_SALE: &str = include_str!("../../queries/app_subscription_sale.graphql");
pub const APP_SALE_ADJUSTMENT: &str = include_str!("../../queries/app_sale_adjustment.graphql");
pub const APP_CREDIT: &str = include_str!("../../queries/app_credit.graphql");
pub const APP_RELATIONSHIP: &str = include_str!("../../queries/app_relationship.graphql");
pub const APP_SUBSCRIPTION_CHARGE: &str =
    include_str!("../../queries/app_subscription_charge.graphql");
