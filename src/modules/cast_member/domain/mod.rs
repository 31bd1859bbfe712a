pub mod entity;

pub use entity::{CastMember, CastMemberFilter, CastMemberKind};
