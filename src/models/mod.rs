pub mod part;

pub use part::{Part, PartChanges, SavePartInput, STATUS_PREPARING_TRUCK, STATUS_SHIPPED};
