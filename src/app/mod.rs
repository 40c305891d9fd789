pub mod script;
pub mod setup;

pub use script::{DemoScript, DemoStep, log_world_events, run_demo_script};
pub use setup::{setup_demo_site, speed_up_time};
