pub mod auth;

pub mod class_members;

pub mod classes;

pub use auth::configure_auth_routes;
pub use class_members::configure_class_members_routes;
pub use classes::configure_classes_routes;
