//! Local representations of the service's resources, each implementing
//! [`RemoteEntity`](resource_framework::RemoteEntity).

pub mod group;
pub mod ids;
pub mod mailing;
pub mod member;

pub use group::*;
pub use ids::*;
pub use mailing::*;
pub use member::*;
