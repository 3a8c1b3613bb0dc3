use crate::descriptor::MethodDescriptor;

/// Per-call information handed to interceptors and handlers.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    method: &'static MethodDescriptor,
}

impl CallContext {
    pub fn new(method: &'static MethodDescriptor) -> Self {
        Self { method }
    }

    /// The method being invoked. `method().path` is the full routing key.
    pub fn method(&self) -> &'static MethodDescriptor {
        self.method
    }
}
