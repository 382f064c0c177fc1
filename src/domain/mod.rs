// Domain layer - Manifest model and the pure dashboard rules
pub mod layout;
pub mod manifest;
pub mod section;
pub mod slug;
pub mod visibility;
