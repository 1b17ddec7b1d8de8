pub mod channel;
pub mod entry;
pub mod favourite;
pub mod topic;

pub use channel::Channel;
pub use entry::Entry;
pub use favourite::{FavouriteEntry, FavouriteTopic, SaveOutcome};
pub use topic::Topic;
