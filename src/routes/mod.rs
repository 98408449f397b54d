pub mod router;

pub use router::serve;
