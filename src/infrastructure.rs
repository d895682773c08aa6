// Infrastructure layer modules
pub mod lambda_invoker;
pub mod logging;
pub mod stack_outputs;
pub mod tracer;

// Re-exports
pub use lambda_invoker::{AwsFunctionInvoker, FunctionInvoker, InvokeError};
pub use logging::{LogLevel, init_logging};
pub use stack_outputs::{StackOutputs, StackOutputsError};
pub use tracer::{ContextMissing, LogTracer, Tracer, TracerConfig};
