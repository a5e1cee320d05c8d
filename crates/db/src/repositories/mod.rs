pub mod audit_repo;
pub mod project_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
