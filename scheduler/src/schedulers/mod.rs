//! The policy engines.
//!
//! Each engine borrows the read-only [`ProcessSet`](crate::ProcessSet) and
//! owns only its ready structure, so any number of them can run over the
//! same set at once.
mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::Sjf;

mod srtf;
pub use srtf::Srtf;

mod round_robin;
pub use round_robin::RoundRobin;
