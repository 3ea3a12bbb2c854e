pub mod activity_service;
pub mod activity_service_impl;
pub use activity_service::{ACTIVITY_PAGE_SIZE, ActivityError, ActivityService};
pub use activity_service_impl::SeaOrmActivityService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod generator_service;
pub mod generator_service_impl;
pub use generator_service::{GeneratedBatch, GeneratorError, GeneratorService};
pub use generator_service_impl::DefaultGeneratorService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{AdminOverview, CreateUserRequest, UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
