mod clean;
mod info;
mod plan;
mod run;
mod verify;

pub use clean::cmd_clean;
pub use info::cmd_info;
pub use plan::cmd_plan;
pub use run::cmd_run;
pub use verify::cmd_verify;
