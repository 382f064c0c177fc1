// Presentation layer - Native commands: static preview server and inspect report
pub mod handlers;
pub mod inspect;
pub mod router;
