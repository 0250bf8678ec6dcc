#[path = "commands.rs"]
pub mod commands;

// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    OutputTargets, output_targets_from_args, parse_yes_no, prompt_output_targets,
    prompt_until_valid, resolve_output_path, resolve_run_config,
};
