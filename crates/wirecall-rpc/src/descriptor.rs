/// Call shape. Only unary calls (one request, one response) exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Unary,
}

/// Static description of one remote method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Fully qualified service name, e.g. `myapp.hello.v1.Hello`.
    pub service: &'static str,
    /// Bare method name, e.g. `SayHello`.
    pub name: &'static str,
    /// Routing key: `/<service>/<method>`.
    pub path: &'static str,
    pub request_type: &'static str,
    pub response_type: &'static str,
    pub kind: CallKind,
}

/// The methods of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub methods: &'static [MethodDescriptor],
}

impl ServiceDescriptor {
    pub fn method(&self, name: &str) -> Option<&'static MethodDescriptor> {
        self.methods.iter().find(|method| method.name == name)
    }
}
