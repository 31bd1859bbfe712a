pub mod domain;
pub mod infrastructure;

pub use domain::{CastMember, CastMemberFilter, CastMemberKind};
pub use infrastructure::CastMemberRepositoryImpl;
