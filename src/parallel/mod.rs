pub mod batch;
pub mod pool;
pub mod progress;

pub use batch::Batches;
pub use pool::WorkerPool;
pub use progress::Progress;
