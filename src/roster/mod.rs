pub mod person;
pub mod stats;
pub mod store;
pub mod team;
pub mod value;

pub use person::{Person, PersonId};
pub use stats::{Grade, Stats};
pub use store::RosterStore;
pub use team::{Team, TeamId};
pub use value::{Champion, Name, Rank, Role, Tag};
