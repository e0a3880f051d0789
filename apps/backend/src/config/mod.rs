pub mod route_policy;
pub mod settings;

pub use route_policy::RouteAuthPolicy;
pub use settings::AuthSettings;
