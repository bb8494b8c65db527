mod pull_request;
mod pull_request_action;
mod pull_request_event;

pub use pull_request::GhPullRequest;
pub use pull_request_action::GhPullRequestAction;
pub use pull_request_event::GhPullRequestEvent;
