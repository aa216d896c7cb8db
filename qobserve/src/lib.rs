//! Production-friendly observability hooks for completion operations.
//!
//! ```rust
//! use qobserve::{MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks};
//!
//! let _hooks = SafeOperationHooks::new(TracingOperationHooks);
//! let _metrics = MetricsOperationHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsOperationHooks;
pub use safe_hooks::SafeOperationHooks;
pub use tracing_hooks::TracingOperationHooks;

pub mod prelude {
    pub use crate::{MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks};
}
