mod app;
pub use app::App;

mod identity;
pub use identity::Identity;

mod agent;
pub use agent::Agent;

mod presentation;
pub use presentation::Presentation;

mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
