pub mod cast_member_repository_impl;
pub mod models;

pub use cast_member_repository_impl::CastMemberRepositoryImpl;
