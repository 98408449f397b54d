pub mod poll_request;

pub use poll_request::PollRequest;
