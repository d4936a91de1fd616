pub mod part;

pub use part::Entity as Parts;
