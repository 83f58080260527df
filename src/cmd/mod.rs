mod stage_trace;
pub mod validate;
