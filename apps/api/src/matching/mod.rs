// Skill matching and notification fan-out for newly posted jobs.
// The matcher is pure; the queue runs fan-outs off the request path.

pub mod fanout;
pub mod matcher;
pub mod notifier;
pub mod queue;
