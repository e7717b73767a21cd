/// Screen views
///
/// One module per screen plus the shared form widgets. Screens hold their
/// own state structs; all message handling lives in the application update
/// loop.

pub mod dashboard;
pub mod edit;
pub mod signin;
pub mod storefront;
pub mod widgets;
